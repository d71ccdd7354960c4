// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pre-order depth-first traversal over any tree.
//!
//! ```text
//!   A     D      depth_first([A, D], children)
//!  / \    |        --> A, B, C, D, E
//! B   C   E
//! ```
//!
//! Siblings are visited in the order the `children` callback returns them.
//! The traversal uses an explicit stack, so deep trees cannot overflow.

/// Iterator returned by [`depth_first`].
pub struct DepthFirst<T, F> {
    stack: Vec<T>,
    children: F,
}

/// Walks `roots` and their descendants in pre-order.
pub fn depth_first<T, I, F, C>(roots: I, children: F) -> DepthFirst<T, F>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> C,
    C: IntoIterator<Item = T>,
{
    let mut stack: Vec<T> = roots.into_iter().collect();
    stack.reverse();
    DepthFirst { stack, children }
}

impl<T, F, C> Iterator for DepthFirst<T, F>
where
    F: FnMut(&T) -> C,
    C: IntoIterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend((self.children)(&node));
        self.stack[start..].reverse();
        Some(node)
    }
}
