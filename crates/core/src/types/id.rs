//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
/// - `FromStr` so IDs can be read from form fields and query strings
///
/// # Example
///
/// ```rust
/// # use foodie_core::define_id;
/// define_id!(DishId);
/// define_id!(TableId);
///
/// let dish = DishId::new(1);
/// let table = TableId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: DishId = table;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Menu items are keyed by the integer id the catalog assigns them.
define_id!(MenuItemId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_id_roundtrip_i32() {
        let id = MenuItemId::new(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(MenuItemId::from(42), id);
    }

    #[test]
    fn test_menu_item_id_from_str() {
        let id: MenuItemId = " 7 ".parse().unwrap();
        assert_eq!(id, MenuItemId::new(7));
        assert!("seven".parse::<MenuItemId>().is_err());
    }

    #[test]
    fn test_menu_item_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&MenuItemId::new(3)).unwrap();
        assert_eq!(json, "3");

        let parsed: MenuItemId = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, MenuItemId::new(3));
    }
}
