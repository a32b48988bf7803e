use dv_core::InvoiceFields;

/// `Invoice_<number>_<client>.pdf`, with spaces in the client name replaced
/// by underscores and `Client` used when the name is blank.
pub fn export_file_name(invoice: &InvoiceFields) -> String {
    let client = invoice.client_name.trim();
    let client = if client.is_empty() {
        "Client".to_string()
    } else {
        client.split_whitespace().collect::<Vec<_>>().join("_")
    };
    format!("Invoice_{}_{}.pdf", invoice.invoice_number, client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::NaiveDate;

    fn invoice() -> InvoiceFields {
        InvoiceFields::new(NaiveDate::from_ymd_opt(2024, 5, 5).unwrap())
    }

    #[test]
    fn blank_client_falls_back() {
        assert_eq!(export_file_name(&invoice()), "Invoice_001_Client.pdf");
    }

    #[test]
    fn spaces_become_underscores() {
        let mut inv = invoice();
        inv.invoice_number = "2024-17".to_string();
        inv.client_name = "Acme  Widgets Ltd".to_string();
        assert_eq!(export_file_name(&inv), "Invoice_2024-17_Acme_Widgets_Ltd.pdf");
    }

    #[test]
    fn whitespace_only_client_falls_back() {
        let mut inv = invoice();
        inv.client_name = "   ".to_string();
        assert_eq!(export_file_name(&inv), "Invoice_001_Client.pdf");
    }
}
