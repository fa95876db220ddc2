//! Procedural macros for Rensa.
//!
//! - `#[step]` - turn a zero-argument function into a labelled chain step

use proc_macro::TokenStream;

mod step;

/// Turn a zero-argument function into a labelled chain step.
///
/// The function becomes a struct of the same name (or `name = "..."`) holding
/// a `SharedSink`. Each entry writes the label, then runs the function body;
/// an `Err` from the body is raised as a fault, anything else continues the
/// chain. The label defaults to the struct name and is fixed at compile time.
///
/// `async fn` produces a `Step`, a plain `fn` produces a `SyncStep`.
///
/// ```rust,ignore
/// #[rensa::step(name = "Son")]
/// async fn son() {}
///
/// #[rensa::step(name = "EvilStep", label = "Evil")]
/// fn evil() -> Result<(), rensa::Fault> {
///     Err(rensa::Fault::invalid_operation("Boomer!"))
/// }
///
/// let chain = Chain::builder().step(Son::new(sink.clone())).finish();
/// ```
#[proc_macro_attribute]
pub fn step(attr: TokenStream, item: TokenStream) -> TokenStream {
    step::step_impl(attr, item)
}
