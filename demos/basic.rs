use std::rc::Rc;

use hashq::platform::memory::MemoryPlatform;
use hashq::{Navigator, listener};

fn main() {
    // Start an in-memory session
    let platform = Rc::new(
        MemoryPlatform::new("https://shop.test/orders?type=detail&id=5106#/section1?tab=items")
            .expect("Failed to start session"),
    );
    let navigator = Rc::new(Navigator::new(platform.clone()));

    // Read both namespaces
    {
        let params = navigator.params();
        println!("type: {:?}", params.get("type")); // Some("detail")
        println!("id: {:?}", params.get("id")); // Some("5106")
        println!("hash path: {}", params.hash_path()); // #/section1
        println!("tab: {:?}", params.get_from_hash("tab")); // Some("items")
    }
    println!();

    // Listen for soft navigation
    let watched = Rc::clone(&platform);
    navigator.add_listener(
        listener(move || {
            println!("navigated to {}", watched.href());
            Ok(())
        }),
        false,
    );

    // Shortcuts rewrite the address and notify listeners
    navigator
        .add_query_params([("page", 2)])
        .expect("Failed to add params"); // navigated to https://shop.test/orders?type=detail&id=5106&page=2#/section1?tab=items
    navigator
        .remove_query_params(["type"])
        .expect("Failed to remove params"); // navigated to https://shop.test/orders?id=5106&page=2#/section1?tab=items
    navigator.set_hash("/section2").expect("Failed to set hash"); // navigated to ...#/section2?tab=items
    println!();

    // Store edits reach the address silently through apply()
    navigator.params_mut().update_in_hash([("tab", Some("reviews"))]);
    navigator.apply().expect("Failed to apply");
    println!("URL: {}", platform.href()); // https://shop.test/orders?id=5106&page=2#/section2?tab=reviews

    // Push a new entry, then step back through history
    navigator.push("/orders/5106").expect("Failed to push"); // navigated to https://shop.test/orders/5106
    navigator.go_back(); // navigated to https://shop.test/orders?id=5106&page=2#/section2?tab=reviews
    println!("History length: {}", platform.history_len()); // 2
}
