//! Document profiles: the content template behind each known report.
//!
//! A profile is resolved once from the upload's filename and then drives
//! page estimation, page synthesis and entity synthesis.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileId {
    LotteChemical,
    Samsung,
    Generic,
}

/// A fixed phrase that becomes one entity node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateEntity {
    pub label: &'static str,
    pub category: &'static str,
}

const fn candidate(label: &'static str, category: &'static str) -> CandidateEntity {
    CandidateEntity { label, category }
}

#[derive(Debug)]
pub struct DocumentProfile {
    pub id: ProfileId,
    pub display_name: &'static str,
    pub organization: &'static str,
    /// Lowercase filename fragments that select this profile.
    pub filename_markers: &'static [&'static str],
    /// Page count that overrides size-based estimation.
    pub pinned_pages: Option<u32>,
    /// Section outline used to synthesize page text.
    pub sections: &'static [&'static str],
    pub ai_keywords: &'static [CandidateEntity],
    pub consulting_insights: &'static [CandidateEntity],
}

pub static LOTTE_CHEMICAL: DocumentProfile = DocumentProfile {
    id: ProfileId::LotteChemical,
    display_name: "롯데케미칼 AI 디지털 전환(AIDT) 전략 보고서",
    organization: "Lotte Chemical",
    filename_markers: &["롯데케미칼", "롯데", "lotte", "aidt"],
    pinned_pages: Some(28),
    sections: &[
        "롯데케미칼 AIDT 전략 보고서",
        "목차 (Contents)",
        "Executive Summary",
        "사업 환경 및 AI 트렌드",
        "현황 진단 (As-Is)",
        "AI 기회 영역 도출",
        "목표 모델 (To-Be)",
        "실행 로드맵 (Roadmap)",
        "거버넌스 및 조직",
        "기대 효과 및 ROI",
        "Next Steps 및 의사결정 사항",
    ],
    ai_keywords: &[
        candidate("AI 기반 공정 최적화", "Process AI"),
        candidate("예측 정비 (Predictive Maintenance)", "Predictive Analytics"),
        candidate("디지털 트윈", "Digital Twin"),
        candidate("머신러닝 품질 예측", "Machine Learning"),
        candidate("생성형 AI 업무 자동화", "Generative AI"),
        candidate("스마트 팩토리", "Smart Manufacturing"),
        candidate("데이터 레이크하우스", "Data Platform"),
        candidate("AI 수요 예측", "Predictive Analytics"),
        candidate("컴퓨터 비전 설비 점검", "Computer Vision"),
        candidate("에너지 사용 최적화 AI", "Process AI"),
        candidate("MLOps 플랫폼", "AI Platform"),
        candidate("LLM 기반 지식 검색", "Generative AI"),
        candidate("AI 안전 모니터링", "Safety AI"),
        candidate("탄소 배출 예측 모델", "ESG Analytics"),
    ],
    consulting_insights: &[
        candidate("AIDT 전사 로드맵 수립", "Strategy"),
        candidate("데이터 거버넌스 체계 구축", "Governance"),
        candidate("AI CoE 조직 신설", "Organization"),
        candidate("현업 주도 AI 과제 발굴", "Operating Model"),
        candidate("ROI 기반 과제 우선순위화", "Value Management"),
        candidate("변화관리 및 AI 리터러시 교육", "Change Management"),
        candidate("레거시 시스템 현대화", "Technology"),
        candidate("공급망 가시성 확보", "Operations"),
        candidate("성과 KPI 대시보드", "Performance"),
        candidate("파트너 에코시스템 구축", "Ecosystem"),
        candidate("단계별 PoC 확산 전략", "Strategy"),
        candidate("AI 윤리 및 리스크 관리", "Governance"),
        candidate("클라우드 전환 가속화", "Technology"),
        candidate("ESG 경영 연계", "Sustainability"),
    ],
};

pub static SAMSUNG: DocumentProfile = DocumentProfile {
    id: ProfileId::Samsung,
    display_name: "삼성 DX 혁신 전략 보고서",
    organization: "Samsung Electronics",
    filename_markers: &["삼성", "samsung"],
    pinned_pages: Some(32),
    sections: &[
        "삼성 DX 혁신 전략",
        "Agenda",
        "Executive Summary",
        "글로벌 반도체 시장 동향",
        "제조 데이터 현황 분석",
        "AI 활용 기회 영역",
        "데이터 플랫폼 목표 아키텍처",
        "단계별 실행 계획",
        "운영 모델 및 거버넌스",
        "투자 대비 효과 (ROI)",
    ],
    ai_keywords: &[
        candidate("수율 예측 AI", "Predictive Analytics"),
        candidate("웨이퍼 결함 탐지 비전 AI", "Computer Vision"),
        candidate("공정 이상 감지", "Anomaly Detection"),
        candidate("생성형 AI 설계 지원", "Generative AI"),
        candidate("제조 데이터 플랫폼", "Data Platform"),
        candidate("디지털 트윈 팹", "Digital Twin"),
        candidate("AI 기반 설비 예지보전", "Predictive Analytics"),
        candidate("강화학습 스케줄링", "Optimization"),
        candidate("LLM 고객 지원 에이전트", "Generative AI"),
        candidate("엣지 AI 추론", "AI Platform"),
        candidate("수요 예측 머신러닝", "Machine Learning"),
        candidate("MLOps 표준화", "AI Platform"),
    ],
    consulting_insights: &[
        candidate("DX 거버넌스 위원회 구성", "Governance"),
        candidate("데이터 표준 및 품질 관리", "Data Management"),
        candidate("AI 인재 확보 전략", "Organization"),
        candidate("사업부별 가치 동인 분석", "Value Management"),
        candidate("글로벌 공급망 리스크 대응", "Operations"),
        candidate("클라우드 하이브리드 전략", "Technology"),
        candidate("PoC 성과 측정 KPI", "Performance"),
        candidate("전사 변화관리 프로그램", "Change Management"),
        candidate("오픈 이노베이션 파트너십", "Ecosystem"),
        candidate("단계별 투자 로드맵", "Strategy"),
    ],
};

pub static GENERIC: DocumentProfile = DocumentProfile {
    id: ProfileId::Generic,
    display_name: "Uploaded document",
    organization: "Client",
    filename_markers: &[],
    pinned_pages: None,
    sections: &[
        "Cover",
        "Table of Contents",
        "Executive Summary",
        "Market Context",
        "Current State Assessment",
        "Opportunity Analysis",
        "Target Operating Model",
        "Implementation Roadmap",
        "Governance",
        "Expected Benefits",
    ],
    ai_keywords: &[
        candidate("Artificial Intelligence", "AI Technology"),
        candidate("Machine Learning", "Machine Learning"),
        candidate("Generative AI", "Generative AI"),
        candidate("Predictive Analytics", "Predictive Analytics"),
        candidate("Process Automation", "Automation"),
        candidate("데이터 플랫폼", "Data Platform"),
        candidate("Natural Language Processing", "AI Technology"),
        candidate("Computer Vision", "Computer Vision"),
        candidate("AI 의사결정 지원", "Decision Intelligence"),
        candidate("Digital Twin", "Digital Twin"),
    ],
    consulting_insights: &[
        candidate("Digital Transformation Roadmap", "Strategy"),
        candidate("Data Governance Framework", "Governance"),
        candidate("Operating Model Redesign", "Operating Model"),
        candidate("Change Management Program", "Change Management"),
        candidate("ROI-driven Prioritization", "Value Management"),
        candidate("프로세스 혁신", "Operations"),
        candidate("Capability Building", "Organization"),
        candidate("KPI Framework", "Performance"),
    ],
};

static PROFILES: &[&DocumentProfile] = &[&LOTTE_CHEMICAL, &SAMSUNG];

/// Pick the profile for a filename. Unknown files get the generic template.
pub fn resolve(file_name: &str) -> &'static DocumentProfile {
    let lower = file_name.to_lowercase();
    PROFILES
        .iter()
        .copied()
        .find(|p| p.filename_markers.iter().any(|m| lower.contains(m)))
        .unwrap_or(&GENERIC)
}

impl DocumentProfile {
    /// Title shown for the document; generic uploads use the file stem.
    pub fn document_title(&self, file_name: &str) -> String {
        if self.id != ProfileId::Generic {
            return self.display_name.to_string();
        }
        let stem = std::path::Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .trim();
        if stem.is_empty() {
            self.display_name.to_string()
        } else {
            stem.to_string()
        }
    }

    /// Section heading for zero-based `page_index` out of `page_count`.
    ///
    /// The first two pages take the first two sections (cover, contents);
    /// the remaining sections are spread evenly over the rest.
    pub fn section_for(&self, page_index: usize, page_count: usize) -> &'static str {
        let sections = self.sections;
        if sections.is_empty() {
            return "";
        }
        if page_index < 2 || sections.len() <= 2 || page_count <= 2 {
            return sections[page_index.min(sections.len() - 1)];
        }
        let body = sections.len() - 2;
        let offset = (page_index - 2) * body / (page_count - 2);
        sections[2 + offset.min(body - 1)]
    }
}
