//! Enumerated wire tokens.
//!
//! Each enum is declared with an explicit variant-to-token table. The same
//! table drives serde, [`as_str`](AccessPassState::as_str) and `FromStr`, so a
//! token never depends on how a variant happens to be spelled in Rust.

/// A string that is not a known token for the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} token: {token}")]
pub struct UnknownToken {
    /// Name of the enum being parsed
    pub kind: &'static str,
    /// The rejected input
    pub token: String,
}

/// Declare an enum whose serde representation is a fixed token per variant.
///
/// Extra tokens after `|` are accepted when parsing but never emitted.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $token:literal $(| $alias:literal)*
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $token $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $name {
            /// The wire token for this variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::enums::UnknownToken;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token $(| $alias)* => Ok(Self::$variant),)+
                    _ => Err($crate::enums::UnknownToken {
                        kind: stringify!($name),
                        token: s.to_string(),
                    }),
                }
            }
        }
    };
}

pub(crate) use wire_enum;

wire_enum! {
    /// Lifecycle state of an access pass.
    pub enum AccessPassState {
        /// Issued, not yet installed
        Created => "created",
        /// Installed and usable
        Active => "active",
        /// Temporarily disabled
        Suspended => "suspended",
        /// Detached from its holder's device
        Unlink => "unlink",
        /// Permanently removed
        Deleted => "deleted",
    }
}

wire_enum! {
    /// Wallet platform.
    pub enum Platform {
        /// Apple Wallet
        Apple => "apple",
        /// Google Wallet
        Android => "android",
    }
}

wire_enum! {
    /// NFC credential protocol.
    pub enum Protocol {
        /// MIFARE DESFire
        Desfire => "desfire",
        /// HID Seos (enterprise only)
        Seos => "seos",
        /// Google Smart Tap
        SmartTap => "smart_tap",
    }
}

wire_enum! {
    /// Device class, as used by event log filters.
    pub enum DeviceKind {
        /// Phone
        Mobile => "mobile",
        /// Watch
        Watch => "watch",
    }
}

wire_enum! {
    /// Concrete device model family.
    pub enum DeviceType {
        /// iPhone
        IPhone => "iphone",
        /// Apple Watch
        AppleWatch => "apple_watch",
        /// Android phone
        AndroidPhone => "android_phone",
        /// Wear OS watch
        AndroidWatch => "android_watch",
    }
}

wire_enum! {
    /// Provisioning status of a credential on one device.
    pub enum DeviceStatus {
        /// Credentials generated server-side
        CredentialsCreated => "credentials_created" | "CredentialsCreated",
        /// Pass bundle handed to the wallet
        BundleDelivered => "bundle_delivered",
        /// Installed in the wallet
        Installed => "installed",
        /// Removed from the wallet
        Uninstalled => "uninstalled" | "unintstalled",
        /// Suspended on this device
        Suspended => "suspended",
    }
}

wire_enum! {
    /// Event kinds accepted by the card template event log filter.
    pub enum TemplateEventType {
        /// Pass issued
        Issue => "issue",
        /// Pass installed
        Install => "install",
        /// Pass updated
        Update => "update",
        /// Pass suspended
        Suspend => "suspend",
        /// Pass resumed
        Resume => "resume",
        /// Pass unlinked
        Unlink => "unlink",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_tokens() {
        assert_eq!(
            serde_json::to_string(&AccessPassState::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&AccessPassState::Suspended).unwrap(),
            "\"suspended\""
        );
        assert_eq!(AccessPassState::Unlink.as_str(), "unlink");
    }

    #[test]
    fn multi_word_tokens_use_underscores() {
        assert_eq!(Protocol::SmartTap.as_str(), "smart_tap");
        assert_eq!(DeviceType::AppleWatch.as_str(), "apple_watch");
        assert_eq!(DeviceType::IPhone.as_str(), "iphone");
        assert_eq!(
            serde_json::to_string(&DeviceType::AndroidPhone).unwrap(),
            "\"android_phone\""
        );
    }

    #[test]
    fn aliases_parse_but_are_not_emitted() {
        let status: DeviceStatus = serde_json::from_str("\"unintstalled\"").unwrap();
        assert_eq!(status, DeviceStatus::Uninstalled);
        assert_eq!(status.as_str(), "uninstalled");

        let status: DeviceStatus = serde_json::from_str("\"CredentialsCreated\"").unwrap();
        assert_eq!(status, DeviceStatus::CredentialsCreated);
        assert_eq!("CredentialsCreated".parse::<DeviceStatus>(), Ok(DeviceStatus::CredentialsCreated));
    }

    #[test]
    fn from_str_round_trips_display() {
        for state in [
            AccessPassState::Created,
            AccessPassState::Active,
            AccessPassState::Suspended,
            AccessPassState::Unlink,
            AccessPassState::Deleted,
        ] {
            assert_eq!(state.to_string().parse::<AccessPassState>(), Ok(state));
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = "ACTIVE".parse::<AccessPassState>().unwrap_err();
        assert_eq!(err.kind, "AccessPassState");
        assert_eq!(err.to_string(), "unknown AccessPassState token: ACTIVE");

        assert!(serde_json::from_str::<Platform>("\"windows\"").is_err());
    }
}
