//! Late-bound productions for recursive grammars.
//!
//! A production that refers to itself, or to a sibling that is built later,
//! goes through a [`Rec`] slot. The slot is declared first, handles to it are
//! embedded wherever the production is needed, and the finished production is
//! bound into the slot exactly once.
//!
//! The declaring `Rec` owns the slot. Handles obtained with
//! [`Rec::handle`] (and the one passed to the [`fix`] closure) only hold a
//! weak reference, so a grammar whose production refers back to itself is not
//! a reference cycle and is freed with its owner.
//!
//! # Example
//!
//! ```ignore
//! use seekparse_core::{center, exact_char, fix, natural, Parser};
//!
//! // nested :: natural | '(' nested ')'
//! let nested = fix(|nested| {
//!     natural().or(center(exact_char('('), nested, exact_char(')')))
//! });
//! ```

use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::{BoxedParser, CharStream, Error, Outcome, Parser};

type Slot<T> = OnceCell<BoxedParser<T>>;

enum Link<T> {
    Owned(Rc<Slot<T>>),
    Weak(Weak<Slot<T>>),
}

/// A late-bound, possibly self-referential production.
///
/// Parsing through a `Rec` counts as one level of nesting on the stream (see
/// [`ParseConfig::max_recursion_depth`](crate::ParseConfig::max_recursion_depth)).
pub struct Rec<T> {
    link: Link<T>,
}

impl<T> Rec<T> {
    /// Declares an empty slot and returns its owner.
    pub fn declare() -> Self {
        Self {
            link: Link::Owned(Rc::new(OnceCell::new())),
        }
    }

    /// Returns a weak handle to the same slot, for use inside the grammar.
    pub fn handle(&self) -> Self {
        let weak = match &self.link {
            Link::Owned(slot) => Rc::downgrade(slot),
            Link::Weak(slot) => Weak::clone(slot),
        };
        Self {
            link: Link::Weak(weak),
        }
    }

    /// Returns `true` if this is the owning handle.
    #[inline]
    pub fn is_owner(&self) -> bool {
        matches!(self.link, Link::Owned(_))
    }

    /// Returns `true` once a production has been bound.
    pub fn is_defined(&self) -> bool {
        self.slot().is_some_and(|slot| slot.get().is_some())
    }

    /// Binds the production.
    ///
    /// Fails with [`Error::AlreadyDefined`] on a second call, and with
    /// [`Error::Dropped`] when called on a handle whose owner is gone.
    pub fn define<P>(&self, production: P) -> Result<(), Error>
    where
        P: Parser<Output = T> + 'static,
    {
        let slot = self.slot().ok_or(Error::Dropped)?;
        slot.set(production.boxed())
            .map_err(|_| Error::AlreadyDefined)
    }

    fn slot(&self) -> Option<Rc<Slot<T>>> {
        match &self.link {
            Link::Owned(slot) => Some(Rc::clone(slot)),
            Link::Weak(slot) => slot.upgrade(),
        }
    }
}

impl<T> Clone for Rec<T> {
    /// Clones the handle. Cloning the owner yields another owner; embed
    /// [`handle`](Rec::handle)s in the grammar instead.
    fn clone(&self) -> Self {
        let link = match &self.link {
            Link::Owned(slot) => Link::Owned(Rc::clone(slot)),
            Link::Weak(slot) => Link::Weak(Weak::clone(slot)),
        };
        Self { link }
    }
}

impl<T> Parser for Rec<T> {
    type Output = T;

    fn parse(&self, stream: &mut dyn CharStream) -> Outcome<T> {
        let Some(slot) = self.slot() else {
            return Outcome::HardError(Error::Dropped);
        };
        let Some(production) = slot.get() else {
            return Outcome::HardError(Error::Undefined);
        };

        if let Err(err) = stream.enter_nested() {
            return Outcome::HardError(err);
        }
        let outcome = production.parse(stream);
        stream.exit_nested();
        outcome
    }
}

impl<T> fmt::Debug for Rec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rec")
            .field("owner", &self.is_owner())
            .field("defined", &self.is_defined())
            .finish()
    }
}

/// Declares a recursive production, builds it, and binds it.
///
/// `build` receives a weak handle to the production being defined and
/// returns its body. The returned `Rec` is the owner; keep it alive for as
/// long as the grammar is used.
///
/// The first binding wins: if `build` already bound the slot through its
/// handle with [`Rec::define`], the body it returns is dropped unused.
///
/// Every level of recursion counts against
/// [`ParseConfig::max_recursion_depth`](crate::ParseConfig::max_recursion_depth),
/// 128 by default. Input nested deeper than that is a hard
/// [`Error::RecursionLimitExceeded`] unless the stream was built with
/// [`ParseConfig::disable_recursion_limit`](crate::ParseConfig::disable_recursion_limit)
/// or a larger limit.
pub fn fix<T, P, F>(build: F) -> Rec<T>
where
    P: Parser<Output = T> + 'static,
    F: FnOnce(Rec<T>) -> P,
{
    let owner = Rec::declare();
    let production = build(owner.handle());
    if !owner.is_defined() {
        let bound = owner.define(production);
        debug_assert!(bound.is_ok(), "a fresh owner accepts its first binding");
    }
    owner
}
