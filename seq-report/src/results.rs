//! Results already rendered on the page by the server.

/// One result card: its displayed value and caption.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub value: String,
    pub label: String,
}

/// The feasibility indicator shown above the results.
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityBadge {
    /// Whether the badge carries the success marker
    pub feasible: bool,
    pub text: String,
}

/// Read access to the rendered results.
pub trait RenderedResults {
    /// Every result card, in document order.
    fn result_items(&self) -> Vec<ResultItem>;

    /// The badge, if the page shows one.
    fn feasibility_badge(&self) -> Option<FeasibilityBadge>;
}
