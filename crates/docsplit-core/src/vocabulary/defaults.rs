//! Built-in vocabulary for mortgage closing packages.

use super::Category;

/// Built-in document type definition.
pub(super) struct BuiltinType {
    pub doc_type: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub phrases: &'static [&'static str],
}

pub(super) const BUILTIN_TYPES: &[BuiltinType] = &[
    BuiltinType {
        doc_type: "lenders_closing_instructions",
        title: "Lender's Closing Instructions",
        category: Category::Loan,
        phrases: &["lender's closing instructions", "closing instructions"],
    },
    BuiltinType {
        doc_type: "promissory_note",
        title: "Promissory Note",
        category: Category::Loan,
        phrases: &[
            "promissory note",
            "promise to pay",
            "loan note",
            "for value received",
            "payable without offset",
        ],
    },
    BuiltinType {
        doc_type: "deed_of_trust",
        title: "Deed of Trust",
        category: Category::Legal,
        phrases: &[
            "deed of trust",
            "security instrument",
            "mortgage deed",
            "power of sale",
            "substitution of trustee",
        ],
    },
    BuiltinType {
        doc_type: "settlement_statement",
        title: "Settlement Statement",
        category: Category::Financial,
        phrases: &["settlement statement"],
    },
    BuiltinType {
        doc_type: "closing_disclosure",
        title: "Closing Disclosure",
        category: Category::Financial,
        phrases: &[
            "closing disclosure",
            "closing statement",
            "projected payments",
            "closing cost details",
        ],
    },
    BuiltinType {
        doc_type: "truth_in_lending_disclosure",
        title: "Truth in Lending Disclosure",
        category: Category::Financial,
        phrases: &["truth in lending", "truth in lending disclosure statement"],
    },
    BuiltinType {
        doc_type: "compliance_agreement",
        title: "Compliance Agreement",
        category: Category::Legal,
        phrases: &["compliance agreement"],
    },
    BuiltinType {
        doc_type: "notice_of_right_to_cancel",
        title: "Notice of Right to Cancel",
        category: Category::Legal,
        phrases: &["notice of right to cancel", "right to cancel"],
    },
    BuiltinType {
        doc_type: "hud_va_addendum",
        title: "HUD/VA Addendum",
        category: Category::Loan,
        phrases: &["hud/va addendum"],
    },
    BuiltinType {
        doc_type: "hecm_fnma_sub",
        title: "HECM FNMA Submission",
        category: Category::Loan,
        phrases: &["hecm fnma submission"],
    },
    BuiltinType {
        doc_type: "loan_agreement",
        title: "Loan Agreement",
        category: Category::Loan,
        phrases: &["loan agreement", "credit agreement", "financing agreement"],
    },
    BuiltinType {
        doc_type: "insurance_policy",
        title: "Insurance Policy",
        category: Category::Legal,
        phrases: &[
            "insurance policy",
            "insurance certificate",
            "evidence of insurance",
            "hazard insurance",
        ],
    },
    BuiltinType {
        doc_type: "property_appraisal",
        title: "Property Appraisal",
        category: Category::Property,
        phrases: &[
            "appraisal report",
            "property valuation",
            "market value analysis",
            "comparable sales",
            "appraised value",
        ],
    },
    BuiltinType {
        doc_type: "title_report",
        title: "Title Report",
        category: Category::Legal,
        phrases: &["title report", "title commitment", "title policy", "title insurance"],
    },
    BuiltinType {
        doc_type: "escrow_agreement",
        title: "Escrow Agreement",
        category: Category::Financial,
        phrases: &["escrow agreement", "escrow instructions", "escrow letter"],
    },
    BuiltinType {
        doc_type: "credit_report",
        title: "Credit Report",
        category: Category::Financial,
        phrases: &["credit report", "credit score", "payment history"],
    },
    BuiltinType {
        doc_type: "income_verification",
        title: "Income Verification",
        category: Category::Financial,
        phrases: &[
            "income verification",
            "employment verification",
            "verification of employment",
            "pay stub",
            "profit and loss",
            "bank statement",
        ],
    },
    BuiltinType {
        doc_type: "purchase_agreement",
        title: "Purchase Agreement",
        category: Category::Legal,
        phrases: &[
            "purchase agreement",
            "purchase contract",
            "real estate contract",
            "offer to purchase",
        ],
    },
];
