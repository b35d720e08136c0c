//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field type, so adapters
//! can write `UserPersistenceError::query("boom")`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Construct [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum SamplePortError {
            Unreachable { message: String } => "unreachable: {message}",
            Busy { attempts: u32 } => "busy after {attempts} attempts",
            Rejected { message: String, status: u16 } => "rejected ({status}): {message}",
            Exhausted {} => "pool exhausted",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::unreachable("db down");
        assert_eq!(err.to_string(), "unreachable: db down");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = SamplePortError::busy(3_u32);
        assert_eq!(err, SamplePortError::Busy { attempts: 3 });
    }

    #[test]
    fn mixed_fields_are_positional() {
        let err = SamplePortError::rejected("bad", 409_u16);
        assert_eq!(err.to_string(), "rejected (409): bad");
    }

    #[test]
    fn fieldless_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::exhausted().to_string(), "pool exhausted");
    }
}
