//! Bound parameter placeholders and the per-statement binder store.
//!
//! The store is owned by the builder's statement state, never shared
//! process-wide: sharing it across builders would corrupt ordinal
//! assignment and value order.

use std::cell::Cell;
use std::rc::Rc;

use crate::builder::render::{Render, RenderContext};
use crate::value::Literal;

/// A placeholder for a value supplied out-of-band as a positional
/// parameter rather than inlined as literal text.
///
/// Clones share one registration: the first use inside a statement
/// assigns the ordinal, and finalizing the statement clears it again,
/// so a `Binder` reused on a later statement registers fresh.
#[derive(Debug, Clone)]
pub struct Binder {
    inner: Rc<BinderInner>,
}

#[derive(Debug)]
struct BinderInner {
    value: Literal,
    ordinal: Cell<Option<usize>>,
}

impl Binder {
    /// Creates an unregistered binder wrapping one value.
    #[must_use]
    pub fn new(value: impl Into<Literal>) -> Self {
        Self {
            inner: Rc::new(BinderInner {
                value: value.into(),
                ordinal: Cell::new(None),
            }),
        }
    }

    /// The wrapped value.
    #[must_use]
    pub fn value(&self) -> &Literal {
        &self.inner.value
    }

    /// The 1-based placeholder ordinal, once registered.
    #[must_use]
    pub fn ordinal(&self) -> Option<usize> {
        self.inner.ordinal.get()
    }
}

impl Render for Binder {
    fn render(&self, _ctx: &RenderContext<'_>, binders: &mut BinderStore) -> String {
        let ordinal = binders.register(self);
        format!("${ordinal}")
    }
}

/// Registry assigning stable 1-based ordinals to binders in
/// first-registration order, scoped to one in-flight statement.
#[derive(Debug, Default)]
pub(crate) struct BinderStore {
    registered: Vec<Binder>,
}

impl BinderStore {
    /// Registers the binder on first use and returns its ordinal.
    pub(crate) fn register(&mut self, binder: &Binder) -> usize {
        if let Some(ordinal) = binder.ordinal() {
            return ordinal;
        }
        let ordinal = self.registered.len() + 1;
        binder.inner.ordinal.set(Some(ordinal));
        self.registered.push(binder.clone());
        ordinal
    }

    /// The positional value array; index `i` backs placeholder `$i+1`.
    pub(crate) fn values(&self) -> Vec<Literal> {
        self.registered.iter().map(|b| b.value().clone()).collect()
    }

    /// Clears the ordinal counter and unregisters every binder.
    pub(crate) fn reset(&mut self) {
        for binder in self.registered.drain(..) {
            binder.inner.ordinal.set(None);
        }
    }
}
