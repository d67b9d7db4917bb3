//! A persistent vector that is indexed from the last to the first pushed element.

use core::iter::FromIterator;
use im::Vector;

/// A persistent vector that is indexed from the last to the first pushed element.
///
/// The nth element of a `Stack` is the nth-*last* pushed element,
/// which is convenient when dealing with de Bruijn indices.
/// Cloning a stack is cheap and shares structure with the original,
/// so extending a context for a subterm does not copy the context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack<A: Clone>(Vector<A>);

impl<A: Clone> Stack<A> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Default::default()
    }

    /// Add an element to the top of the stack.
    pub fn push(&mut self, x: A) {
        self.0.push_back(x)
    }

    /// Remove and return an element from the top of the stack.
    pub fn pop(&mut self) -> Option<A> {
        self.0.pop_back()
    }

    /// Return the number of elements on the stack.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the stack contains no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Obtain the nth element counted from the top of the stack.
    pub fn get(&self, n: usize) -> Option<&A> {
        let i = self.len().checked_sub(n + 1)?;
        self.0.get(i)
    }

    /// Return a new stack with an element pushed on top.
    pub fn with(&self, x: A) -> Self {
        let mut stack = self.clone();
        stack.push(x);
        stack
    }

    /// Push an element on the stack, run a function on it, then pop the element.
    ///
    /// This is to simulate function calls like `f(Cons(x, l))`,
    /// which assume that `l` is not changed in this call.
    pub fn with_pushed<F, Y>(&mut self, x: A, f: F) -> Y
    where
        F: FnOnce(&mut Stack<A>) -> Y,
    {
        self.push(x);
        let y = f(self);
        self.pop();
        y
    }

    /// Iterate through the elements of the stack starting from the top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &A> + ExactSizeIterator {
        self.0.iter().rev()
    }
}

impl<A: Clone> Default for Stack<A> {
    fn default() -> Self {
        Self(Vector::new())
    }
}

/// Build a stack whose last element is on top.
impl<A: Clone> FromIterator<A> for Stack<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self(Vector::from_iter(iter))
    }
}

#[test]
fn indices() {
    let stack: Stack<_> = ["a", "b", "c"].into_iter().collect();
    assert_eq!(stack.get(0), Some(&"c"));
    assert_eq!(stack.get(2), Some(&"a"));
    assert_eq!(stack.get(3), None);
    assert_eq!(stack.iter().copied().collect::<Vec<_>>(), ["c", "b", "a"]);
}

#[test]
fn persistence() {
    let mut stack = Stack::new();
    stack.push(1);
    let longer = stack.with(2);
    assert_eq!(stack.len(), 1);
    assert_eq!(longer.get(0), Some(&2));

    let top = stack.with_pushed(3, |s| s.get(0).copied());
    assert_eq!(top, Some(3));
    assert_eq!(stack.len(), 1);
}
