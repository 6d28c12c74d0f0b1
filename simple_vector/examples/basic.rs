use simple_vector::{DynamicArray, reserve};

fn main() {
    println!("--- Basic Usage Example ---");
    let mut arr: DynamicArray<i32> = reserve(4).into();

    for i in 1..=5 {
        arr.push_back(i * 10);
        println!("Pushed: {}, len: {}, cap: {}", i * 10, arr.len(), arr.capacity());
    }

    arr.insert(2, 99);
    println!("After insert at 2: {:?}", arr);

    match arr.at(10) {
        Ok(value) => println!("Element 10: {}", value),
        Err(err) => println!("Checked access failed: {}", err),
    }

    arr.resize(8);
    println!("Resized to 8: {:?} (cap {})", arr, arr.capacity());

    while let Some(val) = arr.pop_back() {
        println!("Popped: {}, len: {}", val, arr.len());
    }
    println!("Capacity kept after popping: {}", arr.capacity());
}
