//! Helper macro for declaring port error enums.

/// Declare a `thiserror` enum plus one snake_case constructor per variant.
///
/// Constructor parameters accept `impl Into<FieldType>`, so string fields
/// take `&str` directly.
macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),+ } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),+ } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum SamplePortError {
            Offline => "store offline",
            Rejected { reason: String } => "rejected: {reason}",
            Limited { reason: String, retry_after: u32 } => "{reason}, retry in {retry_after}s",
        }
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::offline().to_string(), "store offline");
    }

    #[rstest]
    fn string_fields_accept_str() {
        assert_eq!(
            SamplePortError::rejected("duplicate").to_string(),
            "rejected: duplicate"
        );
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::limited("busy", 5_u32);
        assert_eq!(
            err,
            SamplePortError::Limited {
                reason: "busy".to_owned(),
                retry_after: 5
            }
        );
        assert_eq!(err.to_string(), "busy, retry in 5s");
    }
}
