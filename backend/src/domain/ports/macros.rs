//! Defines helper macros for generating domain port error enums.
//!
//! Besides the enum and its `Display` impl, the macro generates one
//! snake-case constructor per variant (`Query { message }` becomes
//! `query(message)`, accepting anything convertible into the field types)
//! and a `kind()` accessor naming the variant as `<Variant>Error`, which
//! adapters report as the failure's `name`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* }) => { Self::$variant { .. } };

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

            /// Variant name suffixed with `Error`, e.g. `QueryError`.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(
                        define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) => {
                            concat!(stringify!($variant), "Error")
                        }
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum StoragePortError {
            Offline => "storage offline",
            Query { message: String } => "query failed: {message}",
            Capacity { used: u32 } => "capacity exhausted at {used}",
            Conflict { message: String, used: u32 } => "conflict: {message} ({used})",
        }
    }

    #[test]
    fn unit_variants_get_zero_argument_constructors() {
        let err = StoragePortError::offline();
        assert_eq!(err.to_string(), "storage offline");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StoragePortError::query("timeout");
        assert_eq!(err.to_string(), "query failed: timeout");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = StoragePortError::conflict("email", 2_u32);
        assert_eq!(err.to_string(), "conflict: email (2)");
    }

    #[test]
    fn kind_names_the_variant() {
        assert_eq!(StoragePortError::offline().kind(), "OfflineError");
        assert_eq!(StoragePortError::capacity(9_u32).kind(), "CapacityError");
        assert_eq!(StoragePortError::query("x").kind(), "QueryError");
    }
}
