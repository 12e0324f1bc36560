#![forbid(unsafe_code)]

use std::{collections::VecDeque, fmt, marker::PhantomData};

use dlist::{Alloc, List};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

/// Returned by `top` and `pop` on an empty stack.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("stack is empty")]
pub struct StackEmpty;

////////////////////////////////////////////////////////////////////////////////

/// The back end of a sequence the stack adapter can sit on: append, remove
/// and peek at the end, plus emptiness and size queries.
pub trait BackContainer {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn back(&self) -> Option<&Self::Item>;

    fn back_mut(&mut self) -> Option<&mut Self::Item>;

    fn push_back(&mut self, value: Self::Item);

    fn push_back_with<F: FnOnce() -> Self::Item>(&mut self, make: F) {
        self.push_back(make());
    }

    fn pop_back(&mut self) -> Option<Self::Item>;
}

impl<T> BackContainer for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }

    fn back(&self) -> Option<&T> {
        VecDeque::back(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        VecDeque::back_mut(self)
    }

    fn push_back(&mut self, value: T) {
        VecDeque::push_back(self, value);
    }

    fn pop_back(&mut self) -> Option<T> {
        VecDeque::pop_back(self)
    }
}

impl<T> BackContainer for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    fn back(&self) -> Option<&T> {
        self.last()
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }

    fn push_back(&mut self, value: T) {
        self.push(value);
    }

    fn pop_back(&mut self) -> Option<T> {
        self.pop()
    }
}

impl<T, A: Alloc> BackContainer for List<T, A> {
    type Item = T;

    fn len(&self) -> usize {
        List::len(self)
    }

    fn is_empty(&self) -> bool {
        List::is_empty(self)
    }

    fn back(&self) -> Option<&T> {
        List::back(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        List::back_mut(self)
    }

    fn push_back(&mut self, value: T) {
        List::push_back(self, value);
    }

    fn push_back_with<F: FnOnce() -> T>(&mut self, make: F) {
        List::push_back_with(self, make);
    }

    fn pop_back(&mut self) -> Option<T> {
        List::pop_back(self)
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Single-threaded container adapter: owns the underlying sequence by value
/// and exposes only its back. Defaults to a `VecDeque` backing; anything
/// implementing [`BackContainer`] works, including `dlist::List`.
pub struct Stack<T, C = VecDeque<T>> {
    container: C,
    marker: PhantomData<fn() -> T>,
}

impl<T, C: BackContainer<Item = T>> Stack<T, C> {
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::from_container(C::default())
    }

    pub fn from_container(container: C) -> Self {
        Self {
            container,
            marker: PhantomData,
        }
    }

    pub fn top(&self) -> Result<&T, StackEmpty> {
        self.container.back().ok_or(StackEmpty)
    }

    pub fn top_mut(&mut self) -> Result<&mut T, StackEmpty> {
        self.container.back_mut().ok_or(StackEmpty)
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn push(&mut self, value: T) {
        self.container.push_back(value);
    }

    /// In-place construction at the top, forwarded to the container.
    pub fn push_with<F: FnOnce() -> T>(&mut self, make: F) {
        self.container.push_back_with(make);
    }

    pub fn pop(&mut self) -> Result<T, StackEmpty> {
        self.container.pop_back().ok_or(StackEmpty)
    }

    /// Read-only view of the backing container, bottom of the stack first.
    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn into_container(self) -> C {
        self.container
    }
}

impl<T, C: BackContainer<Item = T> + Default> Default for Stack<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clone> Clone for Stack<T, C> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            marker: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.container.clone_from(&source.container);
    }
}

impl<T, C: fmt::Debug> fmt::Debug for Stack<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("container", &self.container)
            .finish()
    }
}

impl<T, C: PartialEq> PartialEq for Stack<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.container == other.container
    }
}

impl<T, C: Eq> Eq for Stack<T, C> {}

impl<T, C: BackContainer<Item = T>> Extend<T> for Stack<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}
