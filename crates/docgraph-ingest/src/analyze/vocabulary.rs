//! Controlled vocabularies for heuristic keyword detection.

/// AI and data technology terms, English and Korean.
pub const AI_TERMS: &[&str] = &[
    "AI",
    "Artificial Intelligence",
    "Machine Learning",
    "Deep Learning",
    "Generative AI",
    "LLM",
    "GPT",
    "Neural Network",
    "Computer Vision",
    "Natural Language Processing",
    "NLP",
    "Predictive Analytics",
    "Predictive Maintenance",
    "Digital Twin",
    "MLOps",
    "Data Platform",
    "Big Data",
    "Automation",
    "RPA",
    "Smart Factory",
    "Anomaly Detection",
    "Reinforcement Learning",
    "인공지능",
    "머신러닝",
    "딥러닝",
    "생성형 AI",
    "디지털 트윈",
    "예측 정비",
    "예지보전",
    "컴퓨터 비전",
    "자연어 처리",
    "데이터 플랫폼",
    "빅데이터",
    "자동화",
    "스마트 팩토리",
    "이상 감지",
];

/// Consulting and management vocabulary, English and Korean.
pub const CONSULTING_TERMS: &[&str] = &[
    "Strategy",
    "Roadmap",
    "Digital Transformation",
    "DX",
    "Governance",
    "Operating Model",
    "Change Management",
    "ROI",
    "KPI",
    "Business Case",
    "Value Creation",
    "Prioritization",
    "Target State",
    "As-Is",
    "To-Be",
    "Center of Excellence",
    "PoC",
    "Ecosystem",
    "Risk Management",
    "전략",
    "로드맵",
    "디지털 전환",
    "거버넌스",
    "운영 모델",
    "변화관리",
    "우선순위",
    "기대 효과",
    "실행 계획",
    "의사결정",
    "혁신",
];

/// Vocabulary terms that occur in `text`, in vocabulary order.
///
/// Matching is case-insensitive substring search, except that short ASCII
/// acronyms must stand alone so "AI" does not match inside "maintain".
pub fn find_terms(text: &str, terms: &[&str]) -> Vec<String> {
    let haystack = text.to_lowercase();
    terms
        .iter()
        .filter(|term| contains_term(&haystack, &term.to_lowercase()))
        .map(|term| term.to_string())
        .collect()
}

fn contains_term(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    if !(needle.is_ascii() && needle.len() <= 3) {
        return haystack.contains(needle);
    }
    let bytes = haystack.as_bytes();
    haystack.match_indices(needle).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        before_ok && after_ok
    })
}
