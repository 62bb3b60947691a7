/// Nested bracket-key parameters
use hashq::nested::{self, ParamMap, ParamValue};

fn main() {
    // Parse bracket keys into a tree
    let tree = nested::parse("filter[status]=open&filter[owner][name]=Ann+Lee&page=3");
    println!(
        "status: {:?}",
        tree.get_path(&["filter", "status"]).and_then(ParamValue::as_leaf)
    ); // Some("open")
    println!(
        "owner: {:?}",
        tree.get_path(&["filter", "owner", "name"]).and_then(ParamValue::as_leaf)
    ); // Some("Ann Lee")
    println!("page: {:?}", tree.get("page").and_then(ParamValue::as_leaf)); // Some("3")
    println!();

    // Stringify back, brackets stay literal
    println!("{}", nested::stringify(&tree)); // filter[status]=open&filter[owner][name]=Ann%20Lee&page=3
    println!();

    // Build a tree by hand
    let mut sort = ParamMap::new();
    sort.insert("field", "created");
    sort.insert("dir", "desc");
    let mut query = ParamMap::new();
    query.insert("sort", sort);
    query.insert("q", "rust & wasm");
    println!("{}", nested::stringify(&query)); // sort[field]=created&sort[dir]=desc&q=rust%20%26%20wasm

    // Nest everything under a prefix
    println!("{}", nested::stringify_prefixed(&query, Some("search"))); // search[sort][field]=created&search[sort][dir]=desc&search[q]=rust%20%26%20wasm
}
