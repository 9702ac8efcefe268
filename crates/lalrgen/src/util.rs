//! Formatting helpers.

use std::fmt;

/// Wrap a formatting closure as a [`fmt::Display`] value. Backs the
/// `display(&Grammar)` adapters on the derived structures, which need the
/// grammar at hand to print symbol names.
pub fn display_fn<F>(f: F) -> DisplayFn<F>
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    DisplayFn(f)
}

pub struct DisplayFn<F>(F);

impl<F> fmt::Display for DisplayFn<F>
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.0)(formatter)
    }
}
