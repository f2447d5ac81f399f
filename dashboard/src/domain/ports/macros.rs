//! Helper macro generating port error enums with snake_case constructors.
//!
//! Each variant gets a `thiserror` message and a constructor named after the
//! variant, so adapters write `CustomerStoreError::not_found(id)` instead of
//! spelling out struct literals.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor and message coverage for generated port errors.
    define_port_error! {
        pub enum LedgerPortError {
            Offline => "ledger offline",
            Missing { id: String } => "record {id} missing",
            Throttled { retries: u32 } => "throttled after {retries} retries",
            Rejected { reason: String, code: u16 } => "rejected: {reason} ({code})",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(LedgerPortError::offline().to_string(), "ledger offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = LedgerPortError::missing("7");
        assert_eq!(err, LedgerPortError::Missing { id: "7".to_owned() });
        assert_eq!(err.to_string(), "record 7 missing");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = LedgerPortError::throttled(3_u32);
        assert_eq!(err.to_string(), "throttled after 3 retries");
    }

    #[test]
    fn mixed_fields_are_positional() {
        let err = LedgerPortError::rejected("closed", 409_u16);
        assert_eq!(err.to_string(), "rejected: closed (409)");
    }
}
