//! Parses a document into a tree, walks it, and prints both output styles.

use jsondrip::{JsonContext, JsonFormat, JsonType};

fn main() {
    let my_json = r#"{
  "Name":"Solaris",
  "Flags":[true,false,null],
  "Specs":{"Mass":2.5,"Crew":3}
}"#;

    let mut ctx = JsonContext::dom();
    if ctx.feed(my_json).is_err() {
        let error = ctx.error().expect("feed failed");
        eprintln!("parse failed: {error}");
        return;
    }
    assert!(ctx.completed());

    let tree = ctx.tree_take().expect("completed parse has a tree");
    for pair in tree.iter() {
        let name = pair.pair_name().unwrap();
        let value = pair.pair_value().unwrap();
        println!("{name}: {:?} with {} children", value.kind(), value.count());
    }

    if let Some(mass) = tree.lookup(&["Specs", "Mass"]) {
        println!("mass is {}", mass.as_number().unwrap());
    }
    assert_eq!(tree.lookup(&["Specs", "Wings"]).map(|v| v.kind()), None::<JsonType>);

    println!("packed: {}", tree.to_text(JsonFormat::Packed));
    println!("basic:\n{}", tree.to_text(JsonFormat::Basic));
}
