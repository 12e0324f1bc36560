use std::{
    alloc::{self, Layout},
    fmt,
    iter::FromIterator,
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
};

////////////////////////////////////////////////////////////////////////////////

/// Supplies raw storage for list nodes. The list itself constructs and drops
/// the values living in that storage; an allocator only hands memory out and
/// takes it back.
pub trait Alloc {
    fn allocate(&self, layout: Layout) -> NonNull<u8>;

    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this same allocator
    /// with the same `layout`, and must not be used after this call.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// Default allocation strategy backed by the global allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Heap;

impl Alloc for Heap {
    fn allocate(&self, layout: Layout) -> NonNull<u8> {
        // a node always carries two links, so the layout is never zero-sized
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr).unwrap_or_else(|| alloc::handle_alloc_error(layout))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

////////////////////////////////////////////////////////////////////////////////

struct Node<T> {
    value: T,
    prev: Option<NonNull<Node<T>>>,
    next: Option<NonNull<Node<T>>>,
}

/// Doubly linked list over individually allocated nodes, generic over the
/// allocation strategy.
///
/// Single-threaded by design: no internal synchronization, exclusive access
/// per instance. The list is the sole owner of its whole node chain; every
/// node is allocated exactly once and released exactly once, on every path
/// including unwinds out of element constructors.
pub struct List<T, A: Alloc = Heap> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    alloc: A,
    marker: PhantomData<Box<T>>,
}

unsafe impl<T: Send, A: Alloc + Send> Send for List<T, A> {}
unsafe impl<T: Sync, A: Alloc + Sync> Sync for List<T, A> {}

impl<T> List<T> {
    pub fn new() -> Self {
        Self::with_alloc(Heap)
    }

    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(len, value, Heap)
    }
}

impl<T, A: Alloc> List<T, A> {
    pub fn with_alloc(alloc: A) -> Self {
        Self {
            head: None,
            tail: None,
            alloc,
            marker: PhantomData,
        }
    }

    /// Builds a list of `len` clones of `value`. If a clone panics midway,
    /// every node built so far is dropped and released before the panic
    /// continues, and no list exists afterwards.
    pub fn from_elem_in(len: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut list = Self::with_alloc(alloc);
        for _ in 0..len {
            list.push_back_with(|| value.clone());
        }
        list
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Walks the whole chain; the length is not cached.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    pub fn push_front(&mut self, value: T) {
        self.push_front_with(move || value);
    }

    pub fn push_back(&mut self, value: T) {
        self.push_back_with(move || value);
    }

    /// Constructs the new element in place at the front. Storage is acquired
    /// first; if `make` panics, the node goes straight back to the allocator
    /// and the list is unchanged.
    pub fn push_front_with<F: FnOnce() -> T>(&mut self, make: F) {
        let node = self.new_node(make);
        unsafe {
            (*node.as_ptr()).next = self.head;
            match self.head {
                Some(head) => (*head.as_ptr()).prev = Some(node),
                None => self.tail = Some(node),
            }
            self.head = Some(node);
        }
    }

    /// Same as [`push_front_with`](Self::push_front_with), at the back.
    pub fn push_back_with<F: FnOnce() -> T>(&mut self, make: F) {
        let node = self.new_node(make);
        unsafe {
            (*node.as_ptr()).prev = self.tail;
            match self.tail {
                Some(tail) => (*tail.as_ptr()).next = Some(node),
                None => self.head = Some(node),
            }
            self.tail = Some(node);
        }
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let node = self.head?;
        unsafe {
            self.head = (*node.as_ptr()).next;
            match self.head {
                Some(head) => (*head.as_ptr()).prev = None,
                None => self.tail = None,
            }
            let value = ptr::read(ptr::addr_of!((*node.as_ptr()).value));
            self.release(node);
            Some(value)
        }
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let node = self.tail?;
        unsafe {
            self.tail = (*node.as_ptr()).prev;
            match self.tail {
                Some(tail) => (*tail.as_ptr()).next = None,
                None => self.head = None,
            }
            let value = ptr::read(ptr::addr_of!((*node.as_ptr()).value));
            self.release(node);
            Some(value)
        }
    }

    pub fn clear(&mut self) {
        let mut cursor = self.head.take();
        self.tail = None;
        while let Some(node) = cursor {
            unsafe {
                cursor = (*node.as_ptr()).next;
                ptr::drop_in_place(ptr::addr_of_mut!((*node.as_ptr()).value));
                self.release(node);
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            marker: PhantomData,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            head: self.head,
            tail: self.tail,
            marker: PhantomData,
        }
    }

    fn new_node<F: FnOnce() -> T>(&self, make: F) -> NonNull<Node<T>> {
        let layout = Layout::new::<Node<T>>();
        let node = self.alloc.allocate(layout).cast::<Node<T>>();
        // until the value is written, an unwind out of `make` must hand the
        // raw storage back to the allocator
        let pending = PendingNode {
            alloc: &self.alloc,
            ptr: node.cast(),
            layout,
        };
        unsafe {
            node.as_ptr().write(Node {
                value: make(),
                prev: None,
                next: None,
            });
        }
        mem::forget(pending);
        node
    }

    unsafe fn release(&self, node: NonNull<Node<T>>) {
        unsafe {
            self.alloc
                .deallocate(node.cast(), Layout::new::<Node<T>>())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

struct PendingNode<'a, A: Alloc> {
    alloc: &'a A,
    ptr: NonNull<u8>,
    layout: Layout,
}

impl<A: Alloc> Drop for PendingNode<'_, A> {
    fn drop(&mut self) {
        unsafe { self.alloc.deallocate(self.ptr, self.layout) }
    }
}

////////////////////////////////////////////////////////////////////////////////

impl<T, A: Alloc> Drop for List<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: Alloc + Clone> Clone for List<T, A> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_alloc(self.alloc.clone());
        for value in self {
            copy.push_back_with(|| value.clone());
        }
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        // a failed element clone must leave the target empty, never
        // half-copied; the old allocator stays with the target
        self.clear();
        let mut copy = Self::with_alloc(self.alloc.clone());
        for value in source {
            copy.push_back_with(|| value.clone());
        }
        *self = copy;
    }
}

impl<T: fmt::Debug, A: Alloc> fmt::Debug for List<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, A: Alloc> PartialEq for List<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Alloc> Eq for List<T, A> {}

impl<T, A: Alloc> Extend<T> for List<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

////////////////////////////////////////////////////////////////////////////////

pub struct Iter<'a, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    marker: PhantomData<&'a Node<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.head?;
        if self.head == self.tail {
            self.head = None;
            self.tail = None;
        } else {
            self.head = unsafe { (*node.as_ptr()).next };
        }
        Some(unsafe { &(*node.as_ptr()).value })
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let node = self.tail?;
        if self.head == self.tail {
            self.head = None;
            self.tail = None;
        } else {
            self.tail = unsafe { (*node.as_ptr()).prev };
        }
        Some(unsafe { &(*node.as_ptr()).value })
    }
}

pub struct IterMut<'a, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let node = self.head?;
        if self.head == self.tail {
            self.head = None;
            self.tail = None;
        } else {
            self.head = unsafe { (*node.as_ptr()).next };
        }
        Some(unsafe { &mut (*node.as_ptr()).value })
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        let node = self.tail?;
        if self.head == self.tail {
            self.head = None;
            self.tail = None;
        } else {
            self.tail = unsafe { (*node.as_ptr()).prev };
        }
        Some(unsafe { &mut (*node.as_ptr()).value })
    }
}

pub struct IntoIter<T, A: Alloc = Heap> {
    list: List<T, A>,
}

impl<T, A: Alloc> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }
}

impl<T, A: Alloc> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: Alloc> IntoIterator for List<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter { list: self }
    }
}

impl<'a, T, A: Alloc> IntoIterator for &'a List<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Alloc> IntoIterator for &'a mut List<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
