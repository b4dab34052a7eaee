use std::collections::{HashMap, HashSet};

use crate::models::{CleaningSummary, Enriched};
use crate::types::{group_thousands, CustomerId, Money};

pub const DATASET_DESCRIPTION: &str = "The Online Retail II data set contains all the transactions occurring for a UK-based and registered, non-store online retailer between 01/12/2009 and 09/12/2011. The company mainly sells unique all-occasion gift-ware, and many of its customers are wholesalers.";

pub const COLUMN_DESCRIPTIONS: [(&str, &str); 8] = [
    ("Invoice", "A 6-digit integral number uniquely assigned to each transaction. A code starting with the letter 'C' indicates a cancellation."),
    ("StockCode", "A 5-digit integral number uniquely assigned to each distinct product."),
    ("Description", "Product (item) name."),
    ("Quantity", "The quantity of each product (item) per transaction."),
    ("InvoiceDate", "The day and time when the invoice was generated."),
    ("Price", "Product price per unit in sterling (GBP)."),
    ("Customer ID", "A 5-digit integral number uniquely assigned to each customer."),
    ("Country", "The name of the country where the customer resides.")
];

pub const COLUMN_TYPES: [(&str, &str); 8] = [
    ("Invoice", "Text"),
    ("StockCode", "Text"),
    ("Description", "Text"),
    ("Quantity", "Numeric"),
    ("InvoiceDate", "Datetime"),
    ("Price", "Numeric"),
    ("Customer ID", "Numeric"),
    ("Country", "Text")
];

/// Headline figures for the cleaned dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    /// Distinct invoice identifiers.
    pub total_transactions: usize,
    pub total_revenue: Money,
    /// Total revenue per distinct invoice; zero when there are no invoices.
    pub average_revenue: Money,
    pub unique_customers: usize
}

impl Kpis {
    pub fn compute(enriched: &Enriched<'_>) -> Self {
        let invoices: HashSet<&str> = enriched.records().iter()
            .map(|record| record.transaction.invoice.as_str())
            .collect();
        let customers: HashSet<CustomerId> = enriched.records().iter()
            .map(|record| record.transaction.customer_id)
            .collect();
        let total_revenue: Money = enriched.records().iter()
            .map(|record| Money::new(record.revenue))
            .sum();

        Self {
            total_transactions: invoices.len(),
            total_revenue,
            average_revenue: total_revenue.average_over(invoices.len()),
            unique_customers: customers.len()
        }
    }
}

/// Tier-1 payload: static dataset documentation plus computed KPIs and facts.
#[derive(Debug, Clone)]
pub struct OverviewReport {
    pub description: &'static str,
    pub column_descriptions: &'static [(&'static str, &'static str)],
    pub column_types: &'static [(&'static str, &'static str)],
    pub kpis: Kpis,
    pub facts: Vec<String>,
    pub cleaning: CleaningSummary
}

impl OverviewReport {
    /// KPI table rows as display text, currency with two decimals and separators.
    pub fn kpi_rows(&self) -> Vec<(String, String)> {
        vec![
            ("Total Transactions".to_string(), group_thousands(self.kpis.total_transactions as u64)),
            ("Total Revenue (GBP)".to_string(), self.kpis.total_revenue.to_string()),
            ("Average Revenue per Transaction (GBP)".to_string(), self.kpis.average_revenue.to_string()),
            ("Unique Customers".to_string(), group_thousands(self.kpis.unique_customers as u64)),
            ("Records Retained".to_string(), format!(
                "{} of {}",
                group_thousands(self.cleaning.final_count as u64),
                group_thousands(self.cleaning.initial_count as u64)
            ))
        ]
    }
}

pub fn build_overview(enriched: &Enriched<'_>, cleaning: &CleaningSummary) -> OverviewReport {
    OverviewReport {
        description: DATASET_DESCRIPTION,
        column_descriptions: &COLUMN_DESCRIPTIONS,
        column_types: &COLUMN_TYPES,
        kpis: Kpis::compute(enriched),
        facts: interesting_facts(enriched, cleaning.final_count),
        cleaning: *cleaning
    }
}

/// The canonical fact list: record count, country count, top product, top customer country.
pub fn interesting_facts(enriched: &Enriched<'_>, final_count: usize) -> Vec<String> {
    let mut facts = vec![
        format!(
            "The dataset contains {} cleaned transaction records spanning two years, after removing rows without a Customer ID, cancellations, and zero-value rows.",
            group_thousands(final_count as u64)
        ),
        format!("There are {} unique countries in the dataset.", unique_countries(enriched))
    ];

    if let Some((description, lines)) = most_frequent_product(enriched) {
        facts.push(format!(
            "The most frequently purchased product is '{description}', appearing in {} transaction lines.",
            group_thousands(lines as u64)
        ));
    }

    if let Some((country, customers)) = country_with_most_customers(enriched) {
        facts.push(format!(
            "{country} has the highest number of customers, with {} unique customers.",
            group_thousands(customers as u64)
        ));
    }

    facts
}

pub fn unique_countries(enriched: &Enriched<'_>) -> usize {
    enriched.records().iter()
        .map(|record| record.transaction.country.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Description appearing on the most lines; ties go to the alphabetically first.
pub fn most_frequent_product(enriched: &Enriched<'_>) -> Option<(String, usize)> {
    let mut lines: HashMap<&str, usize> = HashMap::new();

    for record in enriched.records() {
        let description = record.transaction.description.as_str();
        if !description.is_empty() {
            *lines.entry(description).or_default() += 1;
        }
    }

    top_entry(lines)
}

/// Country with the most distinct customers; ties go to the alphabetically first.
pub fn country_with_most_customers(enriched: &Enriched<'_>) -> Option<(String, usize)> {
    let mut customers: HashMap<&str, HashSet<CustomerId>> = HashMap::new();

    for record in enriched.records() {
        customers.entry(record.transaction.country.as_str())
            .or_default()
            .insert(record.transaction.customer_id);
    }

    top_entry(customers.into_iter().map(|(country, ids)| (country, ids.len())))
}

fn top_entry<'a>(counts: impl IntoIterator<Item = (&'a str, usize)>) -> Option<(String, usize)> {
    counts.into_iter()
        .max_by(|(left_name, left_count), (right_name, right_count)| {
            left_count.cmp(right_count).then_with(|| right_name.cmp(left_name))
        })
        .map(|(name, count)| (name.to_string(), count))
}
