//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at one price point on one side.
//! Orders are kept in arrival order to enforce time priority. The queue is a
//! doubly-linked list stored in a slab, so insertion hands back an
//! [`OrderHandle`] that later removes the order in O(1) from any position.

use slab::Slab;
use types::errors::BookError;
use types::numeric::{Price, Stake};
use types::order::Order;

/// Position of a resting order inside its price level queue
///
/// Valid from `add_order` until the order leaves the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderHandle(usize);

#[derive(Debug, Clone)]
struct Node {
    order: Order,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A price level containing orders at a specific price
///
/// `total_volume` always equals the sum of remaining stakes in the queue.
/// Only `add_order`, `remove_order` and `fill_front` change it.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    nodes: Slab<Node>,
    head: Option<usize>,
    tail: Option<usize>,
    total_volume: Stake,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            nodes: Slab::new(),
            head: None,
            tail: None,
            total_volume: Stake::zero(),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Append an order at the back of the queue (time priority)
    pub fn add_order(&mut self, order: Order) -> Result<OrderHandle, BookError> {
        if order.price != self.price {
            return Err(BookError::PriceMismatch {
                level_price: self.price,
                order_price: order.price,
            });
        }

        let total_volume = self
            .total_volume
            .checked_add(order.remaining_stake)
            .ok_or(BookError::VolumeOverflow { price: self.price })?;

        let key = self.nodes.insert(Node {
            order,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.total_volume = total_volume;

        Ok(OrderHandle(key))
    }

    /// Whether `stake` more could rest here without overflowing `total_volume`
    pub fn can_accept(&self, stake: Stake) -> bool {
        self.total_volume.checked_add(stake).is_some()
    }

    /// Unlink an order from anywhere in the queue
    ///
    /// Returns None if the handle does not address a queued order
    pub fn remove_order(&mut self, handle: OrderHandle) -> Option<Order> {
        let node = self.nodes.try_remove(handle.0)?;

        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        debug_assert!(self.total_volume >= node.order.remaining_stake);
        self.total_volume = self.total_volume.saturating_sub(node.order.remaining_stake);

        Some(node.order)
    }

    /// Peek at the front order without removing it
    pub fn front(&self) -> Option<(OrderHandle, &Order)> {
        self.head.map(|key| (OrderHandle(key), &self.nodes[key].order))
    }

    /// Partially consume the front order
    ///
    /// `amount` must be strictly less than the front order's remaining stake;
    /// a full consumption goes through `remove_order` instead. Returns false
    /// without touching the level otherwise.
    pub fn fill_front(&mut self, amount: Stake) -> bool {
        let Some(key) = self.head else {
            return false;
        };
        let order = &mut self.nodes[key].order;
        if amount.is_zero() || amount >= order.remaining_stake {
            return false;
        }

        order.add_fill(amount);
        debug_assert!(self.total_volume >= amount);
        self.total_volume = self.total_volume.saturating_sub(amount);
        true
    }

    /// Look up a queued order by handle
    pub fn get(&self, handle: OrderHandle) -> Option<&Order> {
        self.nodes.get(handle.0).map(|node| &node.order)
    }

    /// Iterate orders front to back
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Get the total remaining stake at this price level
    pub fn total_volume(&self) -> Stake {
        self.total_volume
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.nodes.len()
    }
}

/// FIFO iterator over a level's orders
pub struct Iter<'a> {
    nodes: &'a Slab<Node>,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.order)
    }
}
