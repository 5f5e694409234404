/// One candidate behavior of a simulated user: a single GET request with a
/// relative selection weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedAction {
    path: String,
    weight: usize,
    label: Option<String>,
}

impl WeightedAction {
    /// A GET against `path`, selected with probability
    /// `weight / sum(all weights)` of the owning profile.
    pub fn get(path: impl Into<String>, weight: usize) -> Self {
        Self {
            path: path.into(),
            weight,
            label: None,
        }
    }

    /// Fix the name the runner's reporting aggregates this action under,
    /// independent of the request path. Without a label requests group
    /// under the raw path.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn weight(&self) -> usize {
        self.weight
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Name under which the runner aggregates this action's requests.
    pub fn report_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_name_falls_back_to_the_path() {
        let action = WeightedAction::get("/page2.html", 1);
        assert_eq!(action.report_name(), "/page2.html");
        assert_eq!(action.label(), None);
    }

    #[test]
    fn report_name_prefers_the_label() {
        let action = WeightedAction::get("/item/123", 1).with_label("/item/:id");
        assert_eq!(action.report_name(), "/item/:id");
        assert_eq!(action.path(), "/item/123");
    }
}
