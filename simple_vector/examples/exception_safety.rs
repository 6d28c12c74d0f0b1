use simple_vector::DynamicArray;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Tracked(usize, Arc<AtomicUsize>);

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if self.0 == 2 {
            panic!("refusing to clone element {}", self.0);
        }
        Tracked(self.0, self.1.clone())
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        println!("Dropping element {}", self.0);
        self.1.fetch_add(1, Ordering::SeqCst);
    }
}

fn main() {
    println!("--- Exception Safety & RAII Example ---");
    let drop_count = Arc::new(AtomicUsize::new(0));

    let source: DynamicArray<Tracked> = (0..4).map(|i| Tracked(i, drop_count.clone())).collect();
    let mut target: DynamicArray<Tracked> = DynamicArray::new();
    target.push_back(Tracked(100, drop_count.clone()));

    let outcome = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));
    println!("clone_from panicked: {}", outcome.is_err());
    println!("Target still holds {} element(s), first = {}", target.len(), target[0].0);
    // the two partial clones were dropped during unwinding
    assert_eq!(drop_count.load(Ordering::SeqCst), 2);

    drop(target);
    drop(source);
    println!("Total elements dropped: {}", drop_count.load(Ordering::SeqCst));
    assert_eq!(drop_count.load(Ordering::SeqCst), 7);
}
