use netarena::algo::{auto_connect_nearby, compute_statistics, keep_only_giant_component};
use netarena::spatial::{self, BoundingBox};
use netarena::{ArenaConfig, CommandHistory, GraphArena, Point, Selection};
use rand::Rng;
use tracing_subscriber::EnvFilter;

const DEMO_NODES: usize = 2_000;
const DEMO_EXTENT: f32 = 1_000.0;
const CONNECT_RADIUS: f32 = 30.0;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Netarena v{}", netarena::version());
    println!("==========================================");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => ArenaConfig::from_file(path)?,
        None => ArenaConfig::default(),
    };

    let mut arena = GraphArena::with_config(&config);
    let mut history = CommandHistory::with_config(&config);

    demo_bulk_load(&mut arena)?;
    demo_analysis(&mut arena)?;
    demo_editing(&mut arena, &mut history)?;

    Ok(())
}

fn demo_bulk_load(arena: &mut GraphArena) -> anyhow::Result<()> {
    println!("=== Demo 1: Bulk Load ===");
    let mut rng = rand::thread_rng();
    let positions: Vec<[f32; 2]> = (0..DEMO_NODES)
        .map(|_| [rng.gen_range(0.0..DEMO_EXTENT), rng.gen_range(0.0..DEMO_EXTENT)])
        .collect();

    arena.reset_and_load(&positions, &[])?;
    println!(
        "✓ Loaded {} nodes (capacity {}, version {})",
        arena.node_count(),
        arena.node_capacity(),
        arena.version()
    );

    let added = auto_connect_nearby(arena, CONNECT_RADIUS);
    println!("✓ Auto-connected {} edges within {}m", added, CONNECT_RADIUS);
    println!();
    Ok(())
}

fn demo_analysis(arena: &mut GraphArena) -> anyhow::Result<()> {
    println!("=== Demo 2: Analysis ===");
    let stats = compute_statistics(arena);
    println!("{}", serde_json::to_string_pretty(&stats)?);

    let removed = keep_only_giant_component(arena);
    println!("✓ Pruned {} nodes outside the giant component", removed);
    println!(
        "  Remaining: {} nodes, {} edges",
        arena.node_count(),
        arena.edge_count()
    );
    println!();
    Ok(())
}

fn demo_editing(arena: &mut GraphArena, history: &mut CommandHistory) -> anyhow::Result<()> {
    println!("=== Demo 3: Editing with Undo/Redo ===");
    let Some(extent) = spatial::bounds(arena) else {
        println!("(empty graph)");
        return Ok(());
    };

    let center = extent.center();
    let corner = Point::new(center.x + 50.0, center.y + 50.0);
    let selection = Selection::from_box(arena, &BoundingBox::from_corners(center, corner));
    println!("✓ Selected {} nodes around {}", selection.nodes().len(), center);

    let before = (arena.node_count(), arena.edge_count());
    history.execute(arena, selection.to_batch_delete())?;
    println!(
        "✓ Deleted selection: {} -> {} nodes, {} -> {} edges",
        before.0,
        arena.node_count(),
        before.1,
        arena.edge_count()
    );
    println!("  Selection stale: {}", selection.is_stale(arena));

    if let Some(undone) = history.undo(arena)? {
        println!("✓ Undo '{}'", undone);
    }
    println!(
        "  Restored: {} nodes, {} edges",
        arena.node_count(),
        arena.edge_count()
    );

    if let Some(redone) = history.redo(arena)? {
        println!("✓ Redo '{}'", redone);
    }
    println!(
        "  After redo: {} nodes, {} edges (version {})",
        arena.node_count(),
        arena.edge_count(),
        arena.version()
    );
    Ok(())
}
