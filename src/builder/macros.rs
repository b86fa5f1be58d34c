//! Macros for ergonomic state machine construction.

/// Generate a state id enum usable with [`StateMachine`](crate::machine::StateMachine).
///
/// The enum derives everything [`StateId`](crate::core::StateId) needs,
/// displays as the variant name, and gets an `all_states()` constructor
/// returning one [`State`](crate::core::State) per variant, in declaration
/// order. A variant may carry a display name with `Variant = "Name"`;
/// otherwise the variant name is used.
///
/// # Example
///
/// ```
/// use stategate::state_enum;
///
/// state_enum! {
///     pub enum OrderState {
///         Placed,
///         Shipped,
///         Cancelled = "Cancelled by customer",
///     }
/// }
///
/// let states = OrderState::all_states();
/// assert_eq!(states.len(), 3);
/// assert_eq!(states[2].name(), "Cancelled by customer");
/// assert_eq!(OrderState::Shipped.to_string(), "Shipped");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $display:literal)?
            ),* $(,)?
        }
    ) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant as a named state, in declaration order.
            #[allow(dead_code)]
            pub fn all_states() -> Vec<$crate::core::State<Self>> {
                vec![
                    $(
                        $crate::core::State::new(
                            Self::$variant,
                            $crate::state_enum!(@display $variant $($display)?),
                        )
                    ),*
                ]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str(stringify!($variant))),*
                }
            }
        }
    };

    (@display $variant:ident $display:literal) => { $display };
    (@display $variant:ident) => { stringify!($variant) };
}
