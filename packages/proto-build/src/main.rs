#![allow(clippy::useless_format)]
use anyhow::Result;
use std::io::prelude::*;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let paths = Paths::new();
    download_proto(&paths).await?;
    compile_proto(&paths)?;

    println!("\n--------");
    println!(
        "all prost files written to '{}', copy the chain modules into neutron-proto/src.",
        paths.output
    );
    println!("--------\n");

    Ok(())
}

async fn download_proto(paths: &Paths) -> Result<()> {
    for p in Proto::all() {
        let url = p.url();
        let dest = Path::new(&paths.proto).join(p.dest());
        std::fs::create_dir_all(dest.parent().unwrap())?;
        println!(
            "Downloading from '{}' to '{}'.",
            url,
            dest.to_string_lossy()
        );

        let response = reqwest::get(&url).await?;
        let bytes = response.bytes().await?;
        let mut file = std::fs::File::create(&dest)?;
        file.write_all(&bytes)?;
        println!("Data from '{}' saved to '{}'.", url, dest.to_string_lossy());
    }
    Ok(())
}

fn compile_proto(paths: &Paths) -> Result<()> {
    std::fs::create_dir_all(&paths.output)?;
    std::env::set_var("OUT_DIR", &paths.output);

    let proto_files = Proto::all()
        .into_iter()
        .map(|p| format!("{}/{}", paths.proto, p.dest()))
        .collect::<Vec<_>>();

    prost_build::compile_protos(&proto_files, &[&paths.proto])?;

    Ok(())
}

#[derive(Debug)]
struct Paths {
    proto: String,
    output: String,
}

impl Paths {
    pub fn new() -> Self {
        let cargo_dir_string = std::env::var("CARGO_MANIFEST_DIR").unwrap();
        let temp_path = Path::new(&cargo_dir_string).join("temp");
        let proto_path = Path::new(&temp_path).join("proto");
        let output_path = Path::new(&temp_path).join("output");

        Self {
            proto: proto_path.to_string_lossy().to_string(),
            output: output_path.to_string_lossy().to_string(),
        }
    }
}

const COSMOS_SDK_VERSION: &str = "v0.47.1";
const COSMOS_PROTO_VERSION: &str = "v1.0.0-beta.3";
const ADMIN_MODULE_VERSION: &str = "v1.0.0";
const NEUTRON_VERSION: &str = "v3.0.2";
const SLINKY_VERSION: &str = "v0.3.1";
const REGEN_VERSION: &str = "v1.3.3-alpha.regen.1";
const GOOGLE_VERSION: &str = "master";

const COSMOS_SDK_AMINO: &str = "amino";
const COSMOS_SDK_MSG: &str = "cosmos/msg/v1";

impl Proto {
    pub fn url(&self) -> String {
        match self {
            Proto::Cosmos => format!("https://raw.githubusercontent.com/cosmos/cosmos-proto/{COSMOS_PROTO_VERSION}/proto/cosmos_proto/cosmos.proto"),
            Proto::CosmosSdk(p) => match p {
                ProtoCosmosSdk::Amino => format!("https://raw.githubusercontent.com/cosmos/cosmos-sdk/{COSMOS_SDK_VERSION}/proto/{COSMOS_SDK_AMINO}/amino.proto"),
                ProtoCosmosSdk::Msg => format!("https://raw.githubusercontent.com/cosmos/cosmos-sdk/{COSMOS_SDK_VERSION}/proto/{COSMOS_SDK_MSG}/msg.proto"),
            },
            // actually download from regen, see https://github.com/cosmos/cosmos-sdk/issues/12984#issuecomment-1275674526
            Proto::Gogo => format!("https://raw.githubusercontent.com/regen-network/protobuf/{REGEN_VERSION}/gogoproto/gogo.proto"),
            Proto::Google(p) => match p {
                ProtoGoogle::Annotations => format!("https://raw.githubusercontent.com/googleapis/googleapis/{GOOGLE_VERSION}/google/api/annotations.proto"),
                ProtoGoogle::Http => format!("https://raw.githubusercontent.com/googleapis/googleapis/{GOOGLE_VERSION}/google/api/http.proto"),
            },
            Proto::Admin => format!("https://raw.githubusercontent.com/neutron-org/admin-module/{ADMIN_MODULE_VERSION}/proto/adminmodule/adminmodule/tx.proto"),
            Proto::Interchainqueries => format!("https://raw.githubusercontent.com/neutron-org/neutron/{NEUTRON_VERSION}/proto/neutron/interchainqueries/tx.proto"),
            Proto::Slinky(p) => match p {
                ProtoSlinky::CurrencyPair => format!("https://raw.githubusercontent.com/skip-mev/slinky/{SLINKY_VERSION}/proto/slinky/types/v1/currency_pair.proto"),
                ProtoSlinky::MarketMapParams => format!("https://raw.githubusercontent.com/skip-mev/slinky/{SLINKY_VERSION}/proto/slinky/marketmap/v1/params.proto"),
                ProtoSlinky::MarketMapTx => format!("https://raw.githubusercontent.com/skip-mev/slinky/{SLINKY_VERSION}/proto/slinky/marketmap/v1/tx.proto"),
                ProtoSlinky::IncentivesGenesis => format!("https://raw.githubusercontent.com/skip-mev/slinky/{SLINKY_VERSION}/proto/slinky/incentives/v1/genesis.proto"),
                ProtoSlinky::SlaGenesis => format!("https://raw.githubusercontent.com/skip-mev/slinky/{SLINKY_VERSION}/proto/slinky/sla/v1/genesis.proto"),
                ProtoSlinky::SlaQuery => format!("https://raw.githubusercontent.com/skip-mev/slinky/{SLINKY_VERSION}/proto/slinky/sla/v1/query.proto"),
            },
        }
    }

    pub fn dest(&self) -> String {
        match self {
            Proto::Cosmos => "cosmos_proto/cosmos.proto".to_string(),
            Proto::CosmosSdk(p) => match p {
                ProtoCosmosSdk::Amino => format!("{COSMOS_SDK_AMINO}/amino.proto"),
                ProtoCosmosSdk::Msg => format!("{COSMOS_SDK_MSG}/msg.proto"),
            },
            // actually download from regen, see https://github.com/cosmos/cosmos-sdk/issues/12984#issuecomment-1275674526
            Proto::Gogo => format!("gogoproto/gogo.proto"),
            Proto::Google(p) => match p {
                ProtoGoogle::Annotations => format!("google/api/annotations.proto"),
                ProtoGoogle::Http => format!("google/api/http.proto"),
            },
            Proto::Admin => format!("adminmodule/adminmodule/tx.proto"),
            Proto::Interchainqueries => format!("neutron/interchainqueries/tx.proto"),
            Proto::Slinky(p) => match p {
                ProtoSlinky::CurrencyPair => format!("slinky/types/v1/currency_pair.proto"),
                ProtoSlinky::MarketMapParams => format!("slinky/marketmap/v1/params.proto"),
                ProtoSlinky::MarketMapTx => format!("slinky/marketmap/v1/tx.proto"),
                ProtoSlinky::IncentivesGenesis => format!("slinky/incentives/v1/genesis.proto"),
                ProtoSlinky::SlaGenesis => format!("slinky/sla/v1/genesis.proto"),
                ProtoSlinky::SlaQuery => format!("slinky/sla/v1/query.proto"),
            },
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Proto::Cosmos,
            Proto::CosmosSdk(ProtoCosmosSdk::Amino),
            Proto::CosmosSdk(ProtoCosmosSdk::Msg),
            Proto::Gogo,
            Proto::Google(ProtoGoogle::Annotations),
            Proto::Google(ProtoGoogle::Http),
            Proto::Admin,
            Proto::Interchainqueries,
            Proto::Slinky(ProtoSlinky::CurrencyPair),
            Proto::Slinky(ProtoSlinky::MarketMapParams),
            Proto::Slinky(ProtoSlinky::MarketMapTx),
            Proto::Slinky(ProtoSlinky::IncentivesGenesis),
            Proto::Slinky(ProtoSlinky::SlaGenesis),
            Proto::Slinky(ProtoSlinky::SlaQuery),
        ]
    }
}

enum Proto {
    Cosmos,
    CosmosSdk(ProtoCosmosSdk),
    Gogo,
    Google(ProtoGoogle),
    Admin,
    Interchainqueries,
    Slinky(ProtoSlinky),
}

enum ProtoCosmosSdk {
    Amino,
    Msg,
}

enum ProtoGoogle {
    Annotations,
    Http,
}

enum ProtoSlinky {
    CurrencyPair,
    MarketMapParams,
    MarketMapTx,
    IncentivesGenesis,
    SlaGenesis,
    SlaQuery,
}
