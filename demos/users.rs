/// Users Table Example
///
/// This example demonstrates:
/// - Loading a JSON array of user objects into a ViewEngine
/// - Sorting by a column, and flipping direction with a second click
/// - Searching across every field, nested address fields included
/// - Paging through the results and the "Showing X to Y of Z" footer
///
/// Run with `RUST_LOG=debug` to see the engine's stage logging.

use datatable::{DerivedView, EngineConfig, ViewEngine};

const USERS: &str = r#"[
    {"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz", "address": {"city": "Gwenborough"}, "website": "hildegard.org"},
    {"id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv", "address": {"city": "Wisokyburgh"}, "website": "anastasia.net"},
    {"id": 3, "name": "Clementine Bauch", "username": "Samantha", "email": "Nathan@yesenia.net", "address": {"city": "McKenziehaven"}, "website": "ramiro.info"},
    {"id": 4, "name": "Patricia Lebsack", "username": "Karianne", "email": "Julianne.OConner@kory.org", "address": {"city": "South Elvis"}, "website": "kale.biz"},
    {"id": 5, "name": "Chelsey Dietrich", "username": "Kamren", "email": "Lucio_Hettinger@annie.ca", "address": {"city": "Roscoeview"}, "website": "demarco.info"},
    {"id": 6, "name": "Mrs. Dennis Schulist", "username": "Leopoldo_Corkery", "email": "Karley_Dach@jasper.info", "address": {"city": "South Christy"}, "website": "ola.org"},
    {"id": 7, "name": "Kurtis Weissnat", "username": "Elwyn.Skiles", "email": "Telly.Hoeger@billy.biz", "address": {"city": "Howemouth"}, "website": "elvis.io"},
    {"id": 8, "name": "Nicholas Runolfsdottir V", "username": "Maxime_Nienow", "email": "Sherwood@rosamond.me", "address": {"city": "Aliyaview"}, "website": "jacynthe.com"},
    {"id": 9, "name": "Glenna Reichert", "username": "Delphine", "email": "Chaim_McDermott@dana.io", "address": {"city": "Bartholomebury"}, "website": "conrad.com"},
    {"id": 10, "name": "Clementina DuBuque", "username": "Moriah.Stanton", "email": "Rey.Padberg@karina.biz", "address": {"city": "Lebsackbury"}, "website": "ambrose.net"}
]"#;

const COLUMNS: [&str; 4] = ["name", "username", "email", "address.city"];

fn print_view(engine: &ViewEngine, view: &DerivedView<'_>) {
    let header: Vec<String> = COLUMNS
        .iter()
        .map(|key| format!("{}{}", key, engine.sort_indicator(key).unwrap_or("")))
        .collect();
    println!("   | {} |", header.join(" | "));

    for record in &view.visible_records {
        let cells: Vec<String> = COLUMNS
            .iter()
            .map(|key| record.get(key).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        println!("   | {} |", cells.join(" | "));
    }

    let (first, last, total) = view.showing();
    println!(
        "   Showing {} to {} of {} entries (page {} of {})\n",
        first, last, total, view.current_page, view.total_pages
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== DataTable Users Example ===\n");

    // 1. Load the users
    println!("1. Loading users...");
    let config = EngineConfig::from_env()?;
    let mut engine = ViewEngine::new(config);
    engine.load_json(USERS)?;
    println!("   Loaded {} users\n", engine.buffer().len());
    print_view(&engine, &engine.view());

    // 2. Sort by name
    println!("2. Sorting by name...");
    engine.set_sort_key("name");
    print_view(&engine, &engine.view());

    // 3. Click the same header again
    println!("3. Clicking 'name' again flips the direction...");
    engine.set_sort_key("name");
    print_view(&engine, &engine.view());

    // 4. Page through
    println!("4. Paging forward...");
    while engine.has_next() {
        engine.next_page()?;
        print_view(&engine, &engine.view());
    }
    if let Err(e) = engine.next_page() {
        println!("   Next past the last page: {}\n", e);
    }

    // 5. Search narrows the set; the page is clamped
    println!("5. Searching for \".biz\"...");
    engine.set_search(".biz");
    print_view(&engine, &engine.view());

    // 6. Nested fields are searchable
    println!("6. Searching for \"south\" and sorting by city...");
    engine.set_search("south");
    engine.set_sort_key("address.city");
    print_view(&engine, &engine.view());

    // 7. Clear everything
    println!("7. Clearing search and sort...");
    engine.set_search("");
    engine.clear_sort();
    print_view(&engine, &engine.view());

    let stats = engine.stats();
    println!(
        "Stage runs: {} sorts, {} filters",
        stats.sort_runs, stats.filter_runs
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
