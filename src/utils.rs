use rand::{seq::SliceRandom, Rng};

use crate::{Position, Side};

/// Resizes `order` to hold every cell index from `0` to `cells - 1`.
///
/// The buffer is only rebuilt when its length changes, so an order already
/// shuffled for the same grid is reused as is.
pub fn fill_order(order: &mut Vec<usize>, cells: usize){
    if order.len() != cells {
        order.clear();
        order.extend(0..cells);
    }
}

/// Places a stone of `side` on the first legal cell of a freshly shuffled `order`.
///
/// Every legal cell is equally likely to be chosen.
///
/// # Parameters
/// - `position`: The position to play on. Left unchanged if no cell is legal.
/// - `side`: The side placing the stone.
/// - `order`: Buffer of cell indices, shuffled in place.
/// - `rng`: The random number generator used for the shuffle.
///
/// # Returns
/// The cell played, or `None` if `side` has no legal placement.
pub fn random_placement<P: Position, R: Rng + ?Sized>(position: &mut P, side: Side, order: &mut [usize], rng: &mut R) -> Option<usize>{
    order.shuffle(rng);
    order.iter().copied().find(|&cell| position.place(cell, side))
}
