//! Helper macro for declaring error enums with snake-case constructors.
//!
//! Each variant becomes a `thiserror` variant with the given display format,
//! and gains a constructor named after the variant whose `String` parameters
//! accept anything convertible via `Into`.
//!
//! Adapter errors whose variants all carry one `String` field can be declared
//! as `pub enum Name: into_message { .. }` to also get an `into_message`
//! accessor returning that field.

macro_rules! define_error_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident : into_message {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident : String } => $message:expr
            ),* $(,)?
        }
    ) => {
        define_error_enum! {
            $(#[$outer])*
            pub enum $name {
                $(
                    $(#[$variant_meta])*
                    $variant { $field : String } => $message,
                )*
            }
        }

        impl $name {
            /// The detail message, whichever variant carries it.
            pub fn into_message(self) -> String {
                match self {
                    $( Self::$variant { $field } => $field, )*
                }
            }
        }
    };

    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_error_enum!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_error_enum!(
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
                define_error_enum!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_error_enum;

#[cfg(test)]
mod tests {
    //! Constructor generation checks.
    define_error_enum! {
        pub enum SampleError {
            Unit => "unit",
            Message { message: String } => "message: {message}",
            Mixed { message: String, count: u32 } => "mixed: {message} ({count})",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SampleError::unit(), SampleError::Unit);
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = SampleError::message("hello");
        assert_eq!(err.to_string(), "message: hello");
    }

    define_error_enum! {
        pub enum DetailError: into_message {
            Connection { message: String } => "connection: {message}",
            Query { detail: String } => "query: {detail}",
        }
    }

    #[test]
    fn message_accessor_returns_the_carried_detail() {
        assert_eq!(DetailError::connection("refused").into_message(), "refused");
        let query = DetailError::query("syntax error");
        assert_eq!(query.to_string(), "query: syntax error");
        assert_eq!(query.into_message(), "syntax error");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SampleError::mixed("hello", 3_u32);
        assert_eq!(err.to_string(), "mixed: hello (3)");
    }
}
