/// Macro to return early with an error
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::Error::Generic(format!($($arg)*)))
    };
}

/// Declares a plain data struct with the derives every model/IR node carries.
#[macro_export]
macro_rules! common_struct {
    (
        $(#[$attr:meta])*
        pub struct $name:ident { $($t:tt)* }
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $(#[$attr])*
        pub struct $name {
            $($t)*
        }
    };
}

/// Enum counterpart of [`common_struct!`].
#[macro_export]
macro_rules! common_enum {
    (
        $(#[$attr:meta])*
        pub enum $name:ident { $($t:tt)* }
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $(#[$attr])*
        pub enum $name {
            $($t)*
        }
    };
}
