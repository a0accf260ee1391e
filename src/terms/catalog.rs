//! Built-in sample catalog, seeded when no stored or legacy terms exist

use super::models::Term;

struct Entry {
    id: &'static str,
    term: &'static str,
    definition: &'static str,
    category: &'static str,
    pronunciation: &'static str,
    etymology: &'static str,
    example: &'static str,
    related: &'static [&'static str],
}

const SAMPLE_TERMS: &[Entry] = &[
    Entry {
        id: "1",
        term: "Tachycardia",
        definition: "An abnormally rapid heart rate, typically above 100 beats per minute at rest.",
        category: "Cardiology",
        pronunciation: "tak-ih-KAR-dee-uh",
        etymology: "Greek tachys (swift) + kardia (heart)",
        example: "The patient presented with tachycardia after the fever spiked.",
        related: &["2", "3"],
    },
    Entry {
        id: "2",
        term: "Bradycardia",
        definition: "An abnormally slow heart rate, typically below 60 beats per minute.",
        category: "Cardiology",
        pronunciation: "bray-dee-KAR-dee-uh",
        etymology: "Greek bradys (slow) + kardia (heart)",
        example: "Well-trained athletes often show benign bradycardia.",
        related: &["1"],
    },
    Entry {
        id: "3",
        term: "Myocardial Infarction",
        definition: "Death of heart muscle tissue caused by loss of blood supply, commonly called a heart attack.",
        category: "Cardiology",
        pronunciation: "my-oh-KAR-dee-ul in-FARK-shun",
        etymology: "Greek mys (muscle) + kardia (heart); Latin infarcire (to stuff)",
        example: "An ECG confirmed an acute myocardial infarction.",
        related: &["1"],
    },
    Entry {
        id: "4",
        term: "Dyspnea",
        definition: "Difficult or labored breathing; shortness of breath.",
        category: "Pulmonology",
        pronunciation: "DISP-nee-uh",
        etymology: "Greek dys (bad, difficult) + pnoia (breathing)",
        example: "She reported dyspnea on exertion when climbing stairs.",
        related: &["5"],
    },
    Entry {
        id: "5",
        term: "Pneumothorax",
        definition: "Air in the pleural space causing partial or complete collapse of a lung.",
        category: "Pulmonology",
        pronunciation: "noo-moh-THOR-aks",
        etymology: "Greek pneuma (air) + thorax (chest)",
        example: "A chest X-ray revealed a small left pneumothorax.",
        related: &["4"],
    },
    Entry {
        id: "6",
        term: "Hepatomegaly",
        definition: "Abnormal enlargement of the liver.",
        category: "Gastroenterology",
        pronunciation: "hep-uh-toh-MEG-uh-lee",
        etymology: "Greek hepar (liver) + megas (large)",
        example: "Palpation of the abdomen revealed hepatomegaly.",
        related: &["7"],
    },
    Entry {
        id: "7",
        term: "Cholecystitis",
        definition: "Inflammation of the gallbladder, usually caused by gallstones blocking the cystic duct.",
        category: "Gastroenterology",
        pronunciation: "koh-luh-sis-TY-tis",
        etymology: "Greek chole (bile) + kystis (bladder) + -itis (inflammation)",
        example: "Right upper quadrant pain suggested acute cholecystitis.",
        related: &["6"],
    },
    Entry {
        id: "8",
        term: "Hematuria",
        definition: "The presence of blood in the urine.",
        category: "Nephrology",
        pronunciation: "hee-muh-TOOR-ee-uh",
        etymology: "Greek haima (blood) + ouron (urine)",
        example: "Microscopic hematuria was found on routine urinalysis.",
        related: &[],
    },
    Entry {
        id: "9",
        term: "Aphasia",
        definition: "Loss of the ability to understand or express speech, caused by brain damage.",
        category: "Neurology",
        pronunciation: "uh-FAY-zhuh",
        etymology: "Greek a- (without) + phasis (speech)",
        example: "Following the stroke, the patient developed expressive aphasia.",
        related: &["10"],
    },
    Entry {
        id: "10",
        term: "Hemiplegia",
        definition: "Paralysis of one side of the body.",
        category: "Neurology",
        pronunciation: "hem-ee-PLEE-juh",
        etymology: "Greek hemi (half) + plege (stroke)",
        example: "Right-sided hemiplegia indicated a left hemisphere lesion.",
        related: &["9"],
    },
    Entry {
        id: "11",
        term: "Osteoporosis",
        definition: "A condition in which bones become weak and brittle due to loss of bone density.",
        category: "Orthopedics",
        pronunciation: "os-tee-oh-puh-ROH-sis",
        etymology: "Greek osteon (bone) + poros (passage, pore) + -osis (condition)",
        example: "A DEXA scan is used to diagnose osteoporosis.",
        related: &[],
    },
    Entry {
        id: "12",
        term: "Hypoglycemia",
        definition: "An abnormally low level of glucose in the blood.",
        category: "Endocrinology",
        pronunciation: "hy-poh-gly-SEE-mee-uh",
        etymology: "Greek hypo (under) + glykys (sweet) + haima (blood)",
        example: "Sweating and confusion are common signs of hypoglycemia.",
        related: &[],
    },
];

/// The built-in sample terms
pub fn sample_terms() -> Vec<Term> {
    SAMPLE_TERMS
        .iter()
        .map(|e| Term {
            id: e.id.to_string(),
            term: e.term.to_string(),
            definition: e.definition.to_string(),
            category: e.category.to_string(),
            pronunciation: Some(e.pronunciation.to_string()),
            etymology: Some(e.etymology.to_string()),
            example: Some(e.example.to_string()),
            related_terms: e.related.iter().map(|r| r.to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_are_unique() {
        let terms = sample_terms();
        let ids: HashSet<_> = terms.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), terms.len());
    }

    #[test]
    fn test_related_terms_resolve() {
        let terms = sample_terms();
        let ids: HashSet<_> = terms.iter().map(|t| t.id.clone()).collect();
        for term in &terms {
            for related in &term.related_terms {
                assert!(ids.contains(related), "{} -> {}", term.id, related);
            }
        }
    }
}
