//! End-to-end: seed → chunks → layers → markup.

use inkwash_core::{SceneSpec, Seed};
use inkwash_scene::{generate_from_spec, generate_scene, Layer, Render, Scene, SceneNode};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

fn landscape(seed: &str) -> Scene {
    let seed = Seed::from(seed);
    let mut scene = Scene::new(1200.0, 800.0).unwrap();
    let plan: [(&str, &[(&str, f64, f64)]); 4] = [
        ("far", &[("distmount", 600.0, 300.0)]),
        ("hills", &[("mount", 300.0, 500.0), ("flatmount", 800.0, 520.0)]),
        ("shore", &[("rock", 200.0, 560.0), ("tree", 260.0, 560.0)]),
        ("lake", &[("water", 600.0, 600.0), ("boat", 700.0, 620.0)]),
    ];
    for (name, chunks) in plan {
        let mut layer = Layer::new(name);
        for &(kind, x, y) in chunks {
            layer.push(generate_scene(&seed, kind, x, y, &json!({})).unwrap());
        }
        scene.add_layer(layer).unwrap();
    }
    scene
}

#[test]
fn same_seed_renders_identical_scenes() {
    init_tracing();
    let a = landscape("lake-at-dusk");
    let b = landscape("lake-at-dusk");
    assert_eq!(a.render(), b.render());
    assert!(a.render().len() > 1000);
}

#[test]
fn different_seeds_render_different_scenes() {
    init_tracing();
    assert_ne!(landscape("one").render(), landscape("two").render());
}

#[test]
fn parallel_and_sequential_render_agree() {
    init_tracing();
    let scene = landscape("parallel");
    let fragments = scene.render_layers_parallel();
    assert_eq!(fragments.len(), 4);
    for (fragment, layer) in fragments.iter().zip(scene.layers()) {
        assert_eq!(*fragment, layer.render());
    }
    assert_eq!(scene.render_parallel(), scene.render());
}

#[test]
fn markup_uses_polygon_points_with_one_decimal() {
    init_tracing();
    let node = generate_scene(&Seed::from("format"), "boat", 0.0, 0.0, &json!({})).unwrap();
    let markup = node.render();
    let first = markup
        .split("points=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap();
    for pair in first.split(' ') {
        let (x, y) = pair.split_once(',').unwrap();
        for coord in [x, y] {
            let (_, frac) = coord.split_once('.').unwrap();
            assert_eq!(frac.len(), 1, "coordinate {coord} in {pair}");
        }
    }
    assert!(markup.contains("stroke-width:"));
    assert!(!markup.contains("strokeWidth"));
}

#[test]
fn spec_from_json_reproduces_chunk() {
    init_tracing();
    let spec: SceneSpec = serde_json::from_value(json!({
        "seed": "stored",
        "kind": "tree",
        "x": 100.0,
        "y": 400.0,
        "params": {"depth": 1, "branch_probability": 1.0}
    }))
    .unwrap();
    let a = generate_from_spec(&spec).unwrap();
    let b = generate_scene(&Seed::from("stored"), "tree", 100.0, 400.0, &spec.params).unwrap();
    assert_eq!(a.render(), b.render());
    let SceneNode::Chunk(chunk) = a else {
        panic!("expected a chunk");
    };
    // Trunk, three children and a leaf on each child.
    assert_eq!(chunk.elements().len(), 7);
}
