use super::ui;
use crate::core::enrichment::EnrichmentStatus;
use crate::gateway::{DetailRecord, EnrichmentGateway, GatewayError};
use anyhow::Result;
use comfy_table::Cell;
use futures::future::join_all;

pub fn display_as_table(detail: &DetailRecord, status: EnrichmentStatus) -> String {
    let enriched = status == EnrichmentStatus::Ok;
    let mut table = ui::new_styled_table();

    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
    table.add_row(vec![ui::label_cell("Name"), Cell::new(&detail.name)]);
    table.add_row(vec![
        ui::label_cell("Price"),
        ui::number_cell(format!("{:.2}", detail.price)),
    ]);
    table.add_row(vec![
        ui::label_cell("Volume"),
        ui::number_cell(detail.volume.to_string()),
    ]);
    table.add_row(vec![
        ui::label_cell("Market Cap"),
        ui::number_cell(detail.market_cap.clone()),
    ]);
    table.add_row(vec![
        ui::label_cell("P/E Ratio"),
        ui::number_cell(format!("{:.1}", detail.pe_ratio)),
    ]);
    table.add_row(vec![
        ui::label_cell("Sentiment"),
        ui::number_cell(format!("{:.2}", detail.sentiment_score)),
    ]);
    table.add_row(vec![
        ui::label_cell("Analyst Rating"),
        ui::rating_cell(&detail.analyst_rating, enriched),
    ]);

    let mut output = format!(
        "Stock: {}\n\n",
        ui::style_text(&detail.id, ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    if !enriched {
        output.push_str(&format!(
            "\n{}",
            ui::style_text("Analysis unavailable, showing defaults", ui::StyleType::Subtle)
        ));
    }
    output
}

/// Looks up every id concurrently and prints the results in argument order.
pub async fn run(gateway: &EnrichmentGateway, ids: &[String]) -> Result<()> {
    let pb = ui::new_progress_bar(ids.len() as u64);
    pb.set_message("Fetching analysis...");

    let lookups = ids.iter().map(|id| {
        let pb_clone = pb.clone();
        async move {
            let res = gateway.get_detail_with_status(id).await;
            pb_clone.inc(1);
            res
        }
    });
    let results = join_all(lookups).await;
    pb.finish_and_clear();

    let mut missing = Vec::new();
    for result in results {
        match result {
            Ok((detail, status)) => println!("{}\n", display_as_table(&detail, status)),
            Err(GatewayError::NotFound(id)) => {
                println!(
                    "{}\n",
                    ui::style_text(&format!("Stock not found: {id}"), ui::StyleType::Error)
                );
                missing.push(id);
            }
        }
    }

    if !missing.is_empty() {
        anyhow::bail!("Stock not found: {}", missing.join(", "));
    }
    Ok(())
}
