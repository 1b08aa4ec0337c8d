//! Opaque handles used by the hypervisor's object model.
//!
//! References (`VmRef`, `VdiRef`, `SrRef`) are session-scoped and may not
//! survive a hypervisor restart; a `VmUuid` is the durable identifier and
//! the only one safe to publish to later pipeline stages. All of them are
//! carried verbatim, never parsed.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! opaque_handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

opaque_handle! {
    /// Authenticated session token for management-API calls.
    SessionRef
}

opaque_handle! {
    /// Session-scoped reference to a virtual machine object.
    VmRef
}

opaque_handle! {
    /// Session-scoped reference to a virtual disk image object.
    VdiRef
}

opaque_handle! {
    /// Session-scoped reference to a storage repository.
    SrRef
}

opaque_handle! {
    /// Durable, hypervisor-wide unique identifier for an instance.
    VmUuid
}
