//! End-to-end walkthrough of the inventory core
//!
//! This example demonstrates:
//! - Opening a store from YAML configuration
//! - Creating and editing products through the form controller
//! - Searching, sorting and paging through the list controller
//! - Bulk deletion and query-string sync
//!
//! Run with `RUST_LOG=debug` to see store and controller transitions.

use stockroom::prelude::*;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
page_size: 2
storage_key: walkthrough
storage:
  backend: memory
"#;

fn create(store: &mut ProductStore, fields: &[(DraftField, &str)]) -> Result<ProductRecord> {
    let mut form = ProductFormController::create(store.clock());
    for (field, raw) in fields {
        form.set_field(*field, raw);
    }
    match form.submit() {
        SubmitOutcome::Started => {}
        SubmitOutcome::Blocked(report) => {
            for (field, violation) in report.iter() {
                println!("   ✗ {}: {}", field, violation.message);
            }
            anyhow::bail!("draft was rejected");
        }
        other => anyhow::bail!("unexpected submit outcome: {:?}", other),
    }
    let feedback = form.commit(store)?;
    println!("   ✓ {} (id {}) → {}", feedback.message, feedback.record.id, feedback.navigate);
    Ok(feedback.record)
}

fn print_screen(list: &ProductListController, store: &mut ProductStore) {
    match list.render(store) {
        ListScreen::Error { message } => println!("   ⚠️  {}", message),
        ListScreen::Loading => println!("   ⏳ Loading products..."),
        ListScreen::Empty => println!("   📦 No products found yet."),
        ListScreen::Table(page) => {
            for (row, selected) in page.outcome.rows.iter().zip(&page.selected) {
                println!(
                    "   [{}] {:>2} {:<8} {:<10} cost {:>6.2} final {:>6.2}",
                    if *selected { "x" } else { " " },
                    row.id,
                    row.name,
                    row.category.as_str(),
                    row.cost_price,
                    row.final_price()
                );
            }
            let p = &page.outcome.pagination;
            let t = &page.outcome.totals;
            println!(
                "   Page {} of {} ({} items), totals: cost {:.2} sell {:.2} final {:.2}",
                p.page, p.total_pages, p.total, t.cost, t.sell, t.final_price
            );
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("📦 Stockroom Walkthrough");
    println!("========================\n");

    let config = InventoryConfig::from_yaml_str(CONFIG)?;
    let mut store = config.open_store()?;
    let mut list = ProductListController::new();

    println!("➕ Creating products:");
    for (name, category, cost, sell, discount) in [
        ("Milk", "Dairy", "10", "20", "10"),
        ("Bread", "Bakery", "3", "5", "0"),
        ("Cheese", "Dairy", "8", "12", "25"),
        ("Cola", "Beverages", "1", "2", "0"),
    ] {
        create(
            &mut store,
            &[
                (DraftField::Name, name),
                (DraftField::Category, category),
                (DraftField::CostPrice, cost),
                (DraftField::SellPrice, sell),
                (DraftField::Discount, discount),
            ],
        )?;
    }

    println!("\n🚫 A draft that breaks the rules:");
    let _ = create(
        &mut store,
        &[(DraftField::Name, "Old yoghurt"), (DraftField::Discount, "95")],
    );

    println!("\n✏️  Editing product 2:");
    if let FormEntry::Ready(mut form) = ProductFormController::enter(&store, Some("2")) {
        form.set_field(DraftField::Discount, "20");
        println!("   live final price: {:?}", form.final_price());
        form.submit();
        let feedback = form.commit(&mut store)?;
        println!("   ✓ {}", feedback.message);
    }

    println!("\n📋 Page 1:");
    print_screen(&list, &mut store);

    println!("\n🔍 Search \"e\", sorted by cost descending:");
    list.search(&mut store, "e");
    list.sort_by(&mut store, SortField::CostPrice);
    list.sort_by(&mut store, SortField::CostPrice);
    print_screen(&list, &mut store);
    println!("   query: {:?}", list.query_params(&store));

    println!("\n🗑️  Bulk delete the visible page:");
    list.toggle_select_all(&mut store, true);
    print_screen(&list, &mut store);
    match list.bulk_delete(&mut store)? {
        BulkDeleteOutcome::Deleted(n) => println!("   removed {}", n),
        BulkDeleteOutcome::Rejected(notice) => println!("   {}", notice),
    }
    if let BulkDeleteOutcome::Rejected(notice) = list.bulk_delete(&mut store)? {
        println!("   second click: {}", notice);
    }

    println!("\n📋 Remaining:");
    list.search(&mut store, "");
    print_screen(&list, &mut store);

    Ok(())
}
