//! Price-ordered flight index.
//!
//! A red-black tree keyed by fare price, one instance per route. The tree
//! is stored as an arena: nodes live in a contiguous `Vec` and refer to
//! parent and children by index, with a reserved sentinel index standing in
//! for absent links. Rotations only rewrite indices, so there are no
//! parent-pointer cycles or shared sentinel nodes to corrupt.

use std::sync::Arc;

use crate::domain::{FlightRecord, Price};

/// Reserved index representing an absent parent or child.
///
/// Sentinel links are always treated as black during rebalancing.
const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug)]
struct Node {
    flight: Arc<FlightRecord>,
    parent: usize,
    left: usize,
    right: usize,
    color: Color,
}

impl Node {
    fn new(flight: Arc<FlightRecord>) -> Self {
        Self {
            flight,
            parent: NIL,
            left: NIL,
            right: NIL,
            color: Color::Red,
        }
    }

    fn price(&self) -> Price {
        self.flight.price
    }
}

/// A price-ordered index of the flights on one route.
///
/// Duplicate prices coexist as distinct nodes; inserting never overwrites.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use flight_server::catalog::PriceIndex;
/// use flight_server::domain::{AirportCode, ClockTime, FlightId, FlightRecord, Price};
///
/// let mut index = PriceIndex::new();
/// for (id, price) in [("FL123", 500.0), ("FL124", 300.0), ("FL125", 450.0)] {
///     let flight = FlightRecord::new(
///         FlightId::parse(id).unwrap(),
///         AirportCode::parse("LAX").unwrap(),
///         AirportCode::parse("ATL").unwrap(),
///         ClockTime::parse_hhmm("08:00").unwrap(),
///         ClockTime::parse_hhmm("12:00").unwrap(),
///         Price::from_major(price).unwrap(),
///         100,
///     )
///     .unwrap();
///     index.insert(Arc::new(flight));
/// }
///
/// let closest = index.nearest(Price::from_major(460.0).unwrap()).unwrap();
/// assert_eq!(closest.id.as_str(), "FL125");
/// ```
#[derive(Debug)]
pub struct PriceIndex {
    nodes: Vec<Node>,
    root: usize,
}

impl Default for PriceIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
        }
    }

    /// Number of flights in the index.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the index holds no flights.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a flight, keyed by its price.
    ///
    /// Duplicate prices are kept as distinct entries (equal keys descend
    /// right). Always succeeds; the root may change.
    pub fn insert(&mut self, flight: Arc<FlightRecord>) {
        let new_id = self.nodes.len();
        self.nodes.push(Node::new(flight));

        if self.root == NIL {
            self.root = new_id;
            self.nodes[new_id].color = Color::Black;
            return;
        }

        // Standard BST descent
        let key = self.nodes[new_id].price();
        let mut current = self.root;
        let mut parent = NIL;
        let mut went_left = false;

        while current != NIL {
            parent = current;
            if key < self.nodes[current].price() {
                current = self.nodes[current].left;
                went_left = true;
            } else {
                current = self.nodes[current].right;
                went_left = false;
            }
        }

        self.nodes[new_id].parent = parent;
        if went_left {
            self.nodes[parent].left = new_id;
        } else {
            self.nodes[parent].right = new_id;
        }

        self.insert_fixup(new_id);
    }

    /// Returns the flight whose price is closest to `target`.
    ///
    /// Performs a single descent from the root; in a binary search tree
    /// both the floor and the ceiling of `target` lie on this path, so the
    /// minimum absolute difference is always encountered.
    ///
    /// Tie-break (deterministic): the winner minimizes
    /// `(|price - target|, price)` -- equidistant candidates resolve to the
    /// lower price -- and a later node never displaces the current best on
    /// an equal rank, so among exact duplicates the node closest to the
    /// root along the descent path wins.
    ///
    /// Returns `None` on an empty index.
    pub fn nearest(&self, target: Price) -> Option<Arc<FlightRecord>> {
        let mut best: Option<(u32, Price, usize)> = None;
        let mut current = self.root;

        while current != NIL {
            let node = &self.nodes[current];
            let price = node.price();
            let diff = price.abs_diff(target);

            let improves = match best {
                None => true,
                Some((best_diff, best_price, _)) => (diff, price) < (best_diff, best_price),
            };
            if improves {
                best = Some((diff, price, current));
            }

            current = if target < price { node.left } else { node.right };
        }

        best.map(|(_, _, idx)| Arc::clone(&self.nodes[idx].flight))
    }

    /// Iterate flights in ascending price order.
    ///
    /// Traversal keeps an explicit stack rather than recursing, so depth
    /// is bounded by the tree height without consuming call stack.
    pub fn iter_by_price(&self) -> IterByPrice<'_> {
        let mut iter = IterByPrice {
            index: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    fn insert_fixup(&mut self, mut node: usize) {
        while node != self.root && self.color_of(self.nodes[node].parent) == Color::Red {
            let parent = self.nodes[node].parent;
            // Parent is red, so it cannot be the root and a grandparent exists
            let grandparent = self.nodes[parent].parent;

            if parent == self.nodes[grandparent].left {
                let uncle = self.nodes[grandparent].right;

                if self.color_of(uncle) == Color::Red {
                    // Case 1: red uncle, push blackness down from grandparent
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    node = grandparent;
                } else {
                    if node == self.nodes[parent].right {
                        // Case 2: rotate inner child to the outside
                        node = parent;
                        self.rotate_left(node);
                    }
                    // Case 3: outer child, rotate the grandparent
                    let parent = self.nodes[node].parent;
                    let grandparent = self.nodes[parent].parent;
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_right(grandparent);
                }
            } else {
                // Mirror image: parent is a right child
                let uncle = self.nodes[grandparent].left;

                if self.color_of(uncle) == Color::Red {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    node = grandparent;
                } else {
                    if node == self.nodes[parent].left {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.nodes[node].parent;
                    let grandparent = self.nodes[parent].parent;
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.root;
        self.nodes[root].color = Color::Black;
    }

    fn rotate_left(&mut self, x: usize) {
        let y = self.nodes[x].right;
        let y_left = self.nodes[y].left;
        let x_parent = self.nodes[x].parent;

        self.nodes[x].right = y_left;
        if y_left != NIL {
            self.nodes[y_left].parent = x;
        }

        self.nodes[y].parent = x_parent;
        if x == self.root {
            self.root = y;
        } else if x == self.nodes[x_parent].left {
            self.nodes[x_parent].left = y;
        } else {
            self.nodes[x_parent].right = y;
        }

        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    fn rotate_right(&mut self, y: usize) {
        let x = self.nodes[y].left;
        let x_right = self.nodes[x].right;
        let y_parent = self.nodes[y].parent;

        self.nodes[y].left = x_right;
        if x_right != NIL {
            self.nodes[x_right].parent = y;
        }

        self.nodes[x].parent = y_parent;
        if y == self.root {
            self.root = x;
        } else if y == self.nodes[y_parent].right {
            self.nodes[y_parent].right = x;
        } else {
            self.nodes[y_parent].left = x;
        }

        self.nodes[x].right = y;
        self.nodes[y].parent = x;
    }

    /// Color of a node index, treating sentinel links as black.
    fn color_of(&self, idx: usize) -> Color {
        if idx == NIL {
            Color::Black
        } else {
            self.nodes[idx].color
        }
    }
}

/// Ascending-price iterator over a [`PriceIndex`].
#[derive(Debug)]
pub struct IterByPrice<'a> {
    index: &'a PriceIndex,
    stack: Vec<usize>,
}

impl<'a> IterByPrice<'a> {
    fn push_left_spine(&mut self, mut idx: usize) {
        while idx != NIL {
            self.stack.push(idx);
            idx = self.index.nodes[idx].left;
        }
    }
}

impl<'a> Iterator for IterByPrice<'a> {
    type Item = &'a Arc<FlightRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = &self.index.nodes[idx];
        self.push_left_spine(node.right);
        Some(&node.flight)
    }
}

#[cfg(test)]
impl PriceIndex {
    /// Panics unless every red-black and structural invariant holds.
    fn assert_invariants(&self) {
        if self.root == NIL {
            assert!(self.nodes.is_empty());
            return;
        }

        assert_eq!(
            self.nodes[self.root].color,
            Color::Black,
            "root must be black"
        );
        assert_eq!(self.nodes[self.root].parent, NIL, "root must have no parent");
        self.check_subtree(self.root);

        // In-order traversal must be sorted; also proves every node is
        // reachable exactly once.
        let prices: Vec<Price> = self.iter_by_price().map(|f| f.price).collect();
        assert_eq!(prices.len(), self.nodes.len());
        assert!(prices.windows(2).all(|w| w[0] <= w[1]), "not price-ordered");
    }

    /// Returns the black-height of the subtree rooted at `idx`.
    fn check_subtree(&self, idx: usize) -> u32 {
        if idx == NIL {
            return 1;
        }

        let node = &self.nodes[idx];

        if node.color == Color::Red {
            assert_eq!(self.color_of(node.left), Color::Black, "red node, red left child");
            assert_eq!(self.color_of(node.right), Color::Black, "red node, red right child");
        }

        for child in [node.left, node.right] {
            if child != NIL {
                assert_eq!(self.nodes[child].parent, idx, "broken parent link");
            }
        }

        let left_height = self.check_subtree(node.left);
        let right_height = self.check_subtree(node.right);
        assert_eq!(left_height, right_height, "black-height mismatch");

        left_height + u32::from(node.color == Color::Black)
    }
}
