//! Generic FIFO queue of pending tasks
//!
//! Classic doubly-linked FIFO of heap nodes. The queue owns its nodes;
//! payload ownership transfers to whoever pops.
//!
//! Concurrency model: this is a single-producer/single-consumer structure.
//! Link mutation requires `&mut self`, so exactly one thread touches the
//! structure at a time (the controller serializes push and pop behind its
//! own lock). The occupancy counter is published separately through an
//! atomic, so `len()` and `is_empty()` are `&self` and safe to poll from
//! any observer thread while the pair operates the links.

use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::alloc::{alloc, dealloc, Layout};

use crate::error::{RingError, RingResult};

/// One link in the queue. Owned by the queue, never exposed.
struct Node<T> {
    payload: T,
    prev: Option<NonNull<Node<T>>>,
    next: Option<NonNull<Node<T>>>,
}

/// Doubly-linked FIFO queue, generic over the payload type
pub struct FifoQueue<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,

    /// Occupancy, published for observer threads
    len: AtomicUsize,
}

// Safety: the queue owns its nodes; payloads move in and out by value.
unsafe impl<T: Send> Send for FifoQueue<T> {}
unsafe impl<T: Send + Sync> Sync for FifoQueue<T> {}

impl<T> FifoQueue<T> {
    /// Create an empty queue
    pub const fn new() -> Self {
        FifoQueue {
            head: None,
            tail: None,
            len: AtomicUsize::new(0),
        }
    }

    /// Append a payload after the tail
    ///
    /// Fails with `NoMemory` if the node allocation fails; the payload is
    /// dropped in that case and the queue is unchanged.
    pub fn push(&mut self, payload: T) -> RingResult<()> {
        let mut node = Self::alloc_node(payload)?;

        match self.tail {
            Some(mut tail) => {
                // Safety: tail is a live node owned by this queue
                unsafe {
                    node.as_mut().prev = Some(tail);
                    tail.as_mut().next = Some(node);
                }
                self.tail = Some(node);
            }
            None => {
                self.head = Some(node);
                self.tail = Some(node);
            }
        }

        self.len.fetch_add(1, Ordering::Release);
        Ok(())
    }

    /// Remove and return the payload at the head
    pub fn pop(&mut self) -> RingResult<T> {
        let head = self.head.ok_or(RingError::Empty)?;

        // Safety: head is a live node owned by this queue; we take it
        // off the list before deallocating, so no dangling links remain.
        let node = unsafe { head.as_ptr().read() };
        match node.next {
            Some(mut next) => {
                unsafe { next.as_mut().prev = None };
                self.head = Some(next);
            }
            None => {
                self.head = None;
                self.tail = None;
            }
        }
        unsafe { dealloc(head.as_ptr() as *mut u8, Layout::new::<Node<T>>()) };

        self.len.fetch_sub(1, Ordering::Release);
        Ok(node.payload)
    }

    /// Borrow the payload at the head without removing it
    pub fn peek(&self) -> RingResult<&T> {
        match self.head {
            // Safety: head is live and no `&mut self` can exist alongside `&self`
            Some(head) => Ok(unsafe { &head.as_ref().payload }),
            None => Err(RingError::Empty),
        }
    }

    /// Current occupancy (safe to poll from observer threads)
    #[inline]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// Check emptiness via the published counter
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn alloc_node(payload: T) -> RingResult<NonNull<Node<T>>> {
        let layout = Layout::new::<Node<T>>();
        // Safety: Node<T> is never zero-sized (it carries two link fields)
        let raw = unsafe { alloc(layout) as *mut Node<T> };
        let node = NonNull::new(raw).ok_or(RingError::NoMemory)?;
        // Safety: raw is freshly allocated with the right layout
        unsafe {
            node.as_ptr().write(Node {
                payload,
                prev: None,
                next: None,
            });
        }
        Ok(node)
    }

    /// Walk the links and verify the published counter matches
    #[cfg(any(test, feature = "debug-assertions"))]
    pub fn check_links(&self) -> bool {
        let mut count = 0usize;
        let mut cursor = self.head;
        while let Some(node) = cursor {
            count += 1;
            cursor = unsafe { node.as_ref().next };
        }
        count == self.len()
    }
}

impl<T> crate::traits::Fifo<T> for FifoQueue<T> {
    fn push(&mut self, payload: T) -> RingResult<()> {
        FifoQueue::push(self, payload)
    }

    fn pop(&mut self) -> RingResult<T> {
        FifoQueue::pop(self)
    }

    fn peek(&self) -> RingResult<&T> {
        FifoQueue::peek(self)
    }

    fn len(&self) -> usize {
        FifoQueue::len(self)
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        FifoQueue::new()
    }
}

impl<T> Drop for FifoQueue<T> {
    fn drop(&mut self) {
        // Release remaining nodes; payloads drop with them
        while self.pop().is_ok() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut q = FifoQueue::new();
        for i in 0..10 {
            q.push(i).unwrap();
        }
        assert_eq!(q.len(), 10);
        assert!(q.check_links());

        for i in 0..10 {
            assert_eq!(q.pop().unwrap(), i);
        }
        assert_eq!(q.len(), 0);
        assert!(q.is_empty());
    }

    #[test]
    fn test_empty_pop_peek() {
        let mut q = FifoQueue::<u32>::new();

        assert_eq!(q.pop(), Err(RingError::Empty));
        assert_eq!(q.peek(), Err(RingError::Empty));
        assert!(q.is_empty());
        assert!(q.check_links());
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut q = FifoQueue::new();
        q.push("first").unwrap();
        q.push("second").unwrap();

        assert_eq!(*q.peek().unwrap(), "first");
        assert_eq!(*q.peek().unwrap(), "first");
        assert_eq!(q.len(), 2);

        assert_eq!(q.pop().unwrap(), "first");
        assert_eq!(*q.peek().unwrap(), "second");
    }

    #[test]
    fn test_mixed_sequence_size() {
        let mut q = FifoQueue::new();
        let mut pushes = 0u32;
        let mut pops = 0u32;

        for round in 0..5 {
            for i in 0..4 {
                q.push(round * 4 + i).unwrap();
                pushes += 1;
            }
            for _ in 0..3 {
                q.pop().unwrap();
                pops += 1;
            }
            assert_eq!(q.len() as u32, pushes - pops);
            assert!(q.check_links());
        }
    }

    #[test]
    fn test_drop_releases_payloads() {
        use std::rc::Rc;

        let marker = Rc::new(());
        {
            let mut q = FifoQueue::new();
            for _ in 0..4 {
                q.push(Rc::clone(&marker)).unwrap();
            }
            assert_eq!(Rc::strong_count(&marker), 5);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_len_matches_after_interleaving() {
        let mut q = FifoQueue::new();
        q.push(1).unwrap();
        q.push(2).unwrap();
        q.pop().unwrap();
        q.push(3).unwrap();

        assert_eq!(q.len(), 2);
        assert!(q.check_links());
        assert_eq!(q.pop().unwrap(), 2);
        assert_eq!(q.pop().unwrap(), 3);
    }
}
