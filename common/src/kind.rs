//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// The defined enum is a fieldless, `u8`-represented enum rendered and
/// parsed in `SCREAMING_SNAKE_CASE`, which is also its [`serde`]
/// representation.
///
/// # Example
///
/// ```rust,ignore
/// common::define_kind! {
///     #[doc = "Status of an order."]
///     enum Status {
///         #[doc = "Order is placed."]
///         Placed = 1,
///
///         #[doc = "Order is shipped."]
///         Shipped = 2,
///     }
/// }
///
/// assert_eq!(Status::Shipped.to_string(), "SHIPPED");
/// assert_eq!("PLACED".parse::<Status>().unwrap(), Status::Placed);
/// ```
///
/// [`serde`]: https://docs.rs/serde
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::serde::Deserialize,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
            $crate::private::serde::Serialize,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }
    };
}
