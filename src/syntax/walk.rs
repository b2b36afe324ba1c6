//! Depth-first traversal of [`SyntaxNode`] trees.
//!
//! The walker knows nothing about node kinds: it visits every node once,
//! parents before children, children in source order. Interpretation belongs
//! to the [`Visitor`]. Traversal uses an explicit stack, so nesting depth is
//! bounded by heap memory rather than the thread's call stack.

use crate::error::Result;
use crate::syntax::SyntaxNode;

/// What the walker should do after entering a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    /// Visit the node's children.
    Children,
    /// Skip the node's subtree. `leave` is still called for the node.
    Skip,
}

/// Per-node callbacks driven by [`walk`].
pub trait Visitor {
    /// Called before the node's children are visited.
    fn enter(&mut self, _node: &SyntaxNode) -> Result<Descend> {
        Ok(Descend::Children)
    }

    /// Called after the node's subtree has been visited.
    fn leave(&mut self, _node: &SyntaxNode) -> Result<()> {
        Ok(())
    }
}

enum Step<'a> {
    Enter(&'a SyntaxNode),
    Leave(&'a SyntaxNode),
}

/// Visit every node under `root` (inclusive) in source order.
///
/// An error returned by the visitor stops the traversal and is returned.
pub fn walk<V: Visitor + ?Sized>(root: &SyntaxNode, visitor: &mut V) -> Result<()> {
    let mut stack = vec![Step::Enter(root)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                let descend = visitor.enter(node)?;
                stack.push(Step::Leave(node));
                if descend == Descend::Children {
                    stack.extend(node.children().iter().rev().map(Step::Enter));
                }
            }
            Step::Leave(node) => visitor.leave(node)?,
        }
    }

    Ok(())
}

/// Call `f` on every node in traversal order.
pub fn for_each_node<F>(root: &SyntaxNode, f: F)
where
    F: FnMut(&SyntaxNode),
{
    struct Each<F>(F);

    impl<F: FnMut(&SyntaxNode)> Visitor for Each<F> {
        fn enter(&mut self, node: &SyntaxNode) -> Result<Descend> {
            (self.0)(node);
            Ok(Descend::Children)
        }
    }

    // `Each` never fails.
    let _ = walk(root, &mut Each(f));
}
