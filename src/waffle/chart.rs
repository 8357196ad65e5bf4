//! Multi-panel waffle chart: one panel per category, laid out row-major.

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::config::WaffleConfig;
use crate::error::{WaffleError, WaffleResult};
use crate::input::{group_by_category, RecordSource};

use super::grid::WaffleGrid;
use super::interaction::{InteractionKind, Panel, PanelState};
use super::layout::panel_origin;
use super::surface::Surface;

/// A pointer event addressed to a category's panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEvent {
    pub category: String,
    pub kind: InteractionKind,
}

impl InteractionEvent {
    pub fn new(category: impl Into<String>, kind: InteractionKind) -> Self {
        InteractionEvent {
            category: category.into(),
            kind,
        }
    }
}

pub struct WaffleChart {
    panels: IndexMap<String, Panel>,
    pub config: WaffleConfig,
}

impl WaffleChart {
    /// Load all records from `source` and build one panel per category, in
    /// order of first appearance.
    pub fn from_source(source: &mut dyn RecordSource, config: WaffleConfig) -> WaffleResult<Self> {
        let records = source.records()?;
        if records.is_empty() {
            return Err(WaffleError::InvalidData("data source yielded no records".to_string()));
        }
        let grouped = group_by_category(records);

        let slots = config.layout.slot_count();
        if grouped.len() > slots {
            warn!(
                "{} categories but the canvas fits {}; extra panels fall outside it",
                grouped.len(),
                slots
            );
        }

        let mut panels = IndexMap::with_capacity(grouped.len());
        for (slot, (category, records)) in grouped.iter().enumerate() {
            let grid = WaffleGrid::build(category, records)?;
            let captions = config.captions.get(category).cloned().unwrap_or_default();
            if captions.is_empty() {
                debug!("{}: no caption text configured", category);
            }
            let panel = Panel::new(
                grid,
                panel_origin(&config.layout, slot),
                captions,
                config.palette.clone(),
                config.timing.clone(),
            );
            panels.insert(category.clone(), panel);
        }
        info!("Built {} waffle panels", panels.len());

        Ok(WaffleChart { panels, config })
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values()
    }

    pub fn panel(&self, category: &str) -> Option<&Panel> {
        self.panels.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.panels.keys().map(String::as_str)
    }

    /// Emit the initial drawing of every panel.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> WaffleResult<()> {
        for panel in self.panels.values_mut() {
            panel.draw(surface)?;
        }
        Ok(())
    }

    /// Route an event to its panel. Returns whether the panel handled it.
    pub fn dispatch(
        &mut self,
        event: &InteractionEvent,
        now_ms: u64,
        surface: &mut dyn Surface,
    ) -> WaffleResult<bool> {
        let panel = self
            .panels
            .get_mut(&event.category)
            .ok_or_else(|| WaffleError::UnknownCategory(event.category.clone()))?;
        surface.advance_clock(now_ms);
        panel.handle(event.kind, now_ms, surface)
    }

    /// Advance every running reveal to `now_ms`.
    pub fn tick(&mut self, now_ms: u64, surface: &mut dyn Surface) -> WaffleResult<()> {
        for panel in self.panels.values_mut() {
            panel.tick(now_ms, surface)?;
        }
        surface.advance_clock(now_ms);
        Ok(())
    }

    /// True when no panel is mid-reveal.
    pub fn is_settled(&self) -> bool {
        !self.panels.values().any(Panel::is_revealing)
    }

    /// Completion time of the latest running reveal, if any.
    pub fn pending_until_ms(&self) -> Option<u64> {
        self.panels
            .values()
            .filter_map(|p| match p.state() {
                PanelState::Revealing { animation } => Some(animation.finish_time_ms()),
                _ => None,
            })
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CategoryRecord, MemorySource};
    use crate::waffle::surface::CommandLog;

    fn source() -> MemorySource {
        MemorySource::new(vec![
            CategoryRecord::new("water", "no", 11.0),
            CategoryRecord::new("water", "yes", 89.0),
            CategoryRecord::new("poverty", "yes", 90.0),
            CategoryRecord::new("poverty", "no", 10.0),
            CategoryRecord::new("nutrition", "no", 11.0),
            CategoryRecord::new("nutrition", "yes", 89.0),
            CategoryRecord::new("literacy", "no", 14.0),
            CategoryRecord::new("literacy", "yes", 86.0),
        ])
    }

    #[test]
    fn test_panels_follow_first_appearance() {
        let chart = WaffleChart::from_source(&mut source(), WaffleConfig::default()).unwrap();
        let cats: Vec<&str> = chart.categories().collect();
        assert_eq!(cats, vec!["water", "poverty", "nutrition", "literacy"]);
        assert_eq!(chart.panel("poverty").unwrap().origin, (260.0, 20.0));
        assert_eq!(chart.panel("literacy").unwrap().origin, (20.0, 340.0));
    }

    #[test]
    fn test_dispatch_unknown_category() {
        let mut chart = WaffleChart::from_source(&mut source(), WaffleConfig::default()).unwrap();
        let mut log = CommandLog::new();
        let event = InteractionEvent::new("housing", InteractionKind::Hover(1));
        assert!(matches!(
            chart.dispatch(&event, 0, &mut log),
            Err(WaffleError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_panels_are_independent() {
        let mut chart = WaffleChart::from_source(&mut source(), WaffleConfig::default()).unwrap();
        let mut log = CommandLog::new();
        chart
            .dispatch(&InteractionEvent::new("water", InteractionKind::Click(20)), 0, &mut log)
            .unwrap();
        assert!(!chart.is_settled());
        assert_eq!(chart.pending_until_ms(), Some(50 * 9 + 50));

        let handled = chart
            .dispatch(&InteractionEvent::new("poverty", InteractionKind::Hover(3)), 10, &mut log)
            .unwrap();
        assert!(handled);

        chart.tick(10_000, &mut log).unwrap();
        assert!(chart.is_settled());
        assert_eq!(
            chart.panel("water").unwrap().state(),
            &PanelState::Revealed { guess: 20 }
        );
        assert_eq!(
            chart.panel("poverty").unwrap().state(),
            &PanelState::Previewing { guess: 3 }
        );
    }

    #[test]
    fn test_empty_source_rejected() {
        let mut empty = MemorySource::new(Vec::new());
        assert!(WaffleChart::from_source(&mut empty, WaffleConfig::default()).is_err());
    }
}
