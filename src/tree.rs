//! Tree data structure implementation for MCTS

use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Strong reference to a tree node
pub type NodeRef<T> = Rc<RefCell<Node<T>>>;

/// A node in the tree structure
///
/// Children are keyed by the move that leads to them and are created lazily.
/// Nodes hold no reference to their parent, so dropping the last reference to
/// a node releases its whole subtree.
///
/// # Type Parameters
/// - `T`: The data type stored in the node
pub struct Node<T>{
    children: HashMap<usize, NodeRef<T>>,
    data: T
}

#[allow(dead_code)]
impl<T> Node<T>{
    /// Creates a new node with given data and no children
    #[inline]
    pub fn new(data: T) -> Self{
        Node { children: HashMap::new(), data: data }
    }

    /// Creates a new root node with given data
    ///
    /// # Parameters
    /// - `data`: The data to store in the root node
    #[inline]
    pub fn new_root(data: T) -> NodeRef<T>{
        Rc::new(RefCell::new(Node::new(data)))
    }

    /// Gets the child reached by move `i`, if it has been created
    #[inline]
    pub fn get_child(&self, i: usize) -> Option<NodeRef<T>>{
        self.children.get(&i).map(Rc::clone)
    }

    /// Iterates over the created children and the moves leading to them
    #[inline]
    pub fn children(&self) -> impl Iterator<Item = (usize, &NodeRef<T>)>{
        self.children.iter().map(|(&i, child)| (i, child))
    }

    /// Returns the number of created children
    #[inline]
    pub fn child_count(&self) -> usize{
        self.children.len()
    }

    /// Adds a new child node reached by move `i`
    ///
    /// # Parameters
    /// - `node`: The parent node
    /// - `i`: The move leading to the child
    /// - `data`: The data for the new child
    ///
    /// # Returns
    /// Reference to the newly created child node
    #[inline]
    pub fn add_child(node: &NodeRef<T>, i: usize, data: T) -> NodeRef<T>{
        let ref_node = Node::new_root(data);

        node.borrow_mut().children.insert(i, Rc::clone(&ref_node));
        ref_node
    }

    /// Gets a reference to the node's data
    #[inline]
    pub fn get(&self) -> &T{
        &self.data
    }

    /// Gets a mutable reference to the node's data
    #[inline]
    pub fn get_mut(&mut self) -> &mut T{
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root(){
        let root = Node::<u32>::new_root(5);
        let node = & *root.borrow();

        assert_eq!(*node.get(), 5);
        assert_eq!(node.child_count(), 0);
        assert!(node.get_child(0).is_none());
    }

    #[test]
    fn test_add_node(){
        let root = Node::<u32>::new_root(6);

        Node::add_child(&root, 0, 1);
        Node::add_child(&root, 40, 2);
        Node::add_child(&root, 3, 8);

        let root_node = &*root.borrow();

        assert_eq!(root_node.child_count(), 3);
        assert!(root_node.get_child(1).is_none());
        assert_eq!(*root_node.get_child(0).unwrap().borrow().get(), 1);
        assert_eq!(*root_node.get_child(40).unwrap().borrow().get(), 2);
        assert_eq!(*root_node.get_child(3).unwrap().borrow().get(), 8);

        let mut moves: Vec<usize> = root_node.children().map(|(i, _)| i).collect();
        moves.sort();
        assert_eq!(moves, vec![0, 3, 40]);
    }

    #[test]
    fn test_siblings_released_on_reroot(){
        let mut root = Node::<u32>::new_root(0);
        let kept = Node::add_child(&root, 0, 1);
        let sibling = Rc::downgrade(&Node::add_child(&root, 1, 2));
        let grandchild = Rc::downgrade(&Node::add_child(&kept, 2, 3));

        root = kept;

        assert!(sibling.upgrade().is_none());
        assert!(grandchild.upgrade().is_some());
        assert_eq!(*root.borrow().get(), 1);
    }
}
