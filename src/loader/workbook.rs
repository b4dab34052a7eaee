use std::path::Path;
use std::str::FromStr;

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::NaiveDateTime;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::loader::LoadError;
use crate::models::RawTransaction;
use crate::types::CustomerId;

/// Sheets read from the workbook, concatenated in this order.
pub const SHEET_NAMES: [&str; 2] = ["Year 2009-2010", "Year 2010-2011"];

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M"
];

/// Reads every row of the yearly sheets into `RawTransaction`s.
pub fn read_workbook(path: &Path) -> Result<Vec<RawTransaction>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::file_not_found(path));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|error| LoadError::invalid_format(format!("could not open [{}]: {error}", path.display())))?;

    let mut rows = Vec::new();

    for sheet in SHEET_NAMES {
        let range = workbook.worksheet_range(sheet)
            .map_err(|_| LoadError::missing_sheet(sheet))?;
        let before = rows.len();

        read_sheet(sheet, &range, &mut rows)?;
        debug!("Sheet [{sheet}] contributed {} rows", rows.len() - before);
    }

    Ok(rows)
}

fn read_sheet(sheet: &str, range: &Range<Data>, rows: &mut Vec<RawTransaction>) -> Result<(), LoadError> {
    let mut sheet_rows = range.rows();

    let Some(header) = sheet_rows.next() else {
        return Err(LoadError::invalid_format(format!("sheet [{sheet}] is empty")));
    };

    let layout = ColumnLayout::from_header(sheet, header)?;
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0) + 1;

    for (offset, cells) in sheet_rows.enumerate() {
        // Header sits on `first_row`; data rows follow it, numbered as Excel shows them.
        let row_number = first_row + offset + 1;

        if let Some(row) = layout.parse_row(sheet, row_number, cells)? {
            rows.push(row);
        }
    }

    Ok(())
}

/// Positions of the required columns within a sheet, resolved from trimmed header names.
struct ColumnLayout {
    invoice: usize,
    stock_code: usize,
    description: usize,
    quantity: usize,
    invoice_date: usize,
    price: usize,
    customer_id: usize,
    country: usize
}

impl ColumnLayout {
    fn from_header(sheet: &str, header: &[Data]) -> Result<Self, LoadError> {
        let names: Vec<String> = header.iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let find = |column: &str| {
            names.iter().position(|name| name == column)
                .ok_or_else(|| LoadError::missing_column(sheet, column))
        };

        Ok(Self {
            invoice: find("Invoice")?,
            stock_code: find("StockCode")?,
            description: find("Description")?,
            quantity: find("Quantity")?,
            invoice_date: find("InvoiceDate")?,
            price: find("Price")?,
            customer_id: find("Customer ID")?,
            country: find("Country")?
        })
    }

    fn parse_row(&self, sheet: &str, row: usize, cells: &[Data]) -> Result<Option<RawTransaction>, LoadError> {
        if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
            return Ok(None);
        }

        let cell = |index: usize| cells.get(index).unwrap_or(&Data::Empty);
        let invalid = |column: &str, index: usize| LoadError::invalid_cell(sheet, row, column, &cell(index).to_string());

        let invoice = cell_text(cell(self.invoice))
            .ok_or_else(|| invalid("Invoice", self.invoice))?;
        let stock_code = cell_text(cell(self.stock_code))
            .ok_or_else(|| invalid("StockCode", self.stock_code))?;
        let quantity = cell_integer(cell(self.quantity))
            .ok_or_else(|| invalid("Quantity", self.quantity))?;
        let invoice_date = cell_timestamp(cell(self.invoice_date))
            .ok_or_else(|| invalid("InvoiceDate", self.invoice_date))?;
        let unit_price = cell_decimal(cell(self.price))
            .ok_or_else(|| invalid("Price", self.price))?;
        let customer_id = cell_customer_id(cell(self.customer_id))
            .ok_or_else(|| invalid("Customer ID", self.customer_id))?;

        Ok(Some(RawTransaction {
            invoice,
            stock_code,
            description: cell_text(cell(self.description)).unwrap_or_default(),
            quantity,
            invoice_date,
            unit_price,
            customer_id,
            country: cell_text(cell(self.country)).unwrap_or_default()
        }))
    }
}

/// Text content of a cell; integral numbers lose their trailing `.0`.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(value) => {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) if value.fract() == 0.0 => Some(format!("{value:.0}")),
        other => Some(other.to_string())
    }
}

fn cell_integer(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(value) => Some(*value),
        Data::Float(value) if value.fract() == 0.0 => Some(*value as i64),
        Data::String(value) => value.trim().parse().ok(),
        _ => None
    }
}

fn cell_decimal(cell: &Data) -> Option<Decimal> {
    match cell {
        Data::Int(value) => Some(Decimal::from(*value)),
        Data::Float(value) => Decimal::from_f64(*value),
        Data::String(value) => Decimal::from_str(value.trim()).ok(),
        _ => None
    }
}

/// `Some(None)` for an empty cell, `None` when the cell holds something that is not an id.
fn cell_customer_id(cell: &Data) -> Option<Option<CustomerId>> {
    match cell {
        Data::Empty => Some(None),
        Data::Int(value) => CustomerId::try_from(*value).ok().map(Some),
        Data::Float(value) if value.fract() == 0.0 && *value >= 0.0 => Some(Some(*value as CustomerId)),
        Data::String(value) => {
            let value = value.trim();

            if value.is_empty() {
                return Some(None);
            }

            value.parse::<CustomerId>().ok()
                .or_else(|| value.parse::<f64>().ok()
                    .filter(|number| number.fract() == 0.0 && *number >= 0.0)
                    .map(|number| number as CustomerId))
                .map(Some)
        }
        _ => None
    }
}

fn cell_timestamp(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::String(value) => {
            let value = value.trim();
            TIMESTAMP_FORMATS.iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        }
        other => other.as_datetime()
    }
}
