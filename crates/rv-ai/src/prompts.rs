//! Prompt builders

use rv_models::Project;

const UNSET: &str = "not set";

fn entity(project: &Project) -> String {
    project.entity_or("unspecified")
}

fn due_date(project: &Project) -> String {
    project
        .payment_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| UNSET.to_string())
}

pub fn collection_letter(project: &Project) -> String {
    format!(
        "You are a professional project manager. Draft a payment collection reminder.\n\
         Project: {}, counterparty: {}\n\
         Manager: {}, due date: {}\n\
         Total: {}, collected: {}, outstanding: {:.2}.\n\
         Write a polite instant-message notice and a formal email.",
        project.name,
        entity(project),
        project.manager,
        due_date(project),
        project.amount,
        project.collected(),
        project.remaining(),
    )
}

pub fn risk_summary(project: &Project) -> String {
    let sign_date = project
        .sign_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| UNSET.to_string());
    format!(
        "Assess the receivable risk: project: {}, client: {}, signed: {}, agreed payment date: {}, \
         progress: {}%. Give a risk level and recommendations.",
        project.name,
        entity(project),
        sign_date,
        due_date(project),
        project.progress_percent().round_dp(1),
    )
}

pub fn smart_fill(text: &str) -> String {
    format!(
        "Extract the project information from the following text and return it as a single valid JSON \
         object with the keys name, entity, invoiceInfo, signDate, paymentDate, manager, contact and amount. \
         Use YYYY-MM-DD for dates and a plain number for amount. Text: \"{}\"",
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rv_models::Payment;

    fn project() -> Project {
        let mut project = Project::new(1, "Smart city phase one", Decimal::from(500));
        project.entity = "City data bureau".to_string();
        project.manager = "Zhang".to_string();
        project.payment_date = NaiveDate::from_ymd_opt(2023, 6, 30);
        project
            .payments
            .push(Payment::new(1, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(), Decimal::from(200)));
        project
    }

    #[test]
    fn test_collection_letter_carries_figures() {
        let prompt = collection_letter(&project());
        assert!(prompt.contains("Smart city phase one"));
        assert!(prompt.contains("due date: 2023-06-30"));
        assert!(prompt.contains("collected: 200"));
        assert!(prompt.contains("outstanding: 300.00"));
        assert!(!prompt.to_lowercase().contains("risk"));
    }

    #[test]
    fn test_risk_summary_avoids_collection_keyword() {
        let mut project = project();
        project.entity.clear();
        project.sign_date = None;

        let prompt = risk_summary(&project);
        assert!(prompt.contains("progress: 40"));
        assert!(prompt.contains("client: unspecified"));
        assert!(prompt.contains("signed: not set"));
        assert!(!prompt.contains("collection"));
    }
}
