use simple_vector::DynamicArray;
use std::thread;

fn main() {
    println!("--- Cross-thread Ownership Transfer Example ---");
    let mut arr = DynamicArray::new();
    for i in 0..10 {
        arr.push_back(i);
    }

    println!("Original array (thread main): {:?}", arr);

    // Move ownership to another thread
    let handle = thread::spawn(move || {
        println!("Array in new thread: {:?}", arr);
        arr.push_back(100);
        arr
    });

    let mut arr = handle.join().unwrap();
    let moved = arr.take();
    println!("Array back in main thread: {:?}", moved);
    println!("Source after take: len {}, cap {}", arr.len(), arr.capacity());
}
