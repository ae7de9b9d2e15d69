use shared_types::ModelInfo;

/// Pick the remembered model if the backend still offers it, else the first
pub fn select_model<'a>(models: &'a [ModelInfo], remembered: Option<&str>) -> Option<&'a ModelInfo> {
    remembered
        .and_then(|id| models.iter().find(|model| model.id == id))
        .or_else(|| models.first())
}
