use super::ui;
use crate::core::catalog::StockSummary;
use comfy_table::Cell;

pub fn display_as_table(stocks: &[StockSummary]) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
        ui::header_cell("Price"),
    ]);

    for stock in stocks {
        table.add_row(vec![
            Cell::new(&stock.id),
            Cell::new(&stock.name),
            ui::number_cell(format!("{:.2}", stock.price)),
        ]);
    }

    table.to_string()
}

pub fn run(stocks: &[StockSummary]) {
    println!("{}", display_as_table(stocks));
}
