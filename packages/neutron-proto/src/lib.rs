#![allow(missing_docs)]
//! Protobuf message structs for chain-side modules that no published crate
//! covers. The files included below are written by the `proto-build` package;
//! edit the generator, not the generated output.

/// Messages from `cosmos.adminmodule.adminmodule`.
pub mod adminmodule {
    include!("cosmos.adminmodule.adminmodule.rs");
}

/// Messages from `neutron.interchainqueries`.
pub mod interchainqueries {
    include!("neutron.interchainqueries.rs");
}

/// Oracle sidecar modules.
pub mod slinky {
    pub mod types {
        pub mod v1 {
            include!("slinky.types.v1.rs");
        }
    }
    pub mod marketmap {
        pub mod v1 {
            include!("slinky.marketmap.v1.rs");
        }
    }
    pub mod incentives {
        pub mod v1 {
            include!("slinky.incentives.v1.rs");
        }
    }
    pub mod sla {
        pub mod v1 {
            include!("slinky.sla.v1.rs");
        }
    }
}
