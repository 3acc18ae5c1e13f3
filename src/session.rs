use crate::{
    image::{
        render_target::RenderTarget,
        transformer::{DuotoneOptions, DuotoneTransformer},
        Image,
    },
    preview::Preview,
    Result,
};

/// Identifies one image load. Only the most recent ticket of a session is
/// current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Load-then-render flow for a fixed pair of duotone colors.
///
/// Starting a new load supersedes every load still in flight; their results
/// are dropped when they arrive. The latest rendering replaces the previous
/// one.
pub struct Session {
    options: DuotoneOptions,
    target: RenderTarget,
    current_load: u64,
    result: Option<Preview>,
}

impl Session {
    pub fn new(options: DuotoneOptions) -> Self {
        Self {
            options,
            target: RenderTarget::new(),
            current_load: 0,
            result: None,
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.current_load += 1;
        LoadTicket(self.current_load)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.current_load
    }

    /// Renders a finished load.
    ///
    /// Returns `Ok(None)` for a superseded ticket. A failed load or rendering
    /// leaves the previous result in place.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        loaded: Result<Image>,
    ) -> Result<Option<&Preview>> {
        if !self.is_current(ticket) {
            log::debug!(
                "Dropping load {:?}, superseded by load {}",
                ticket,
                self.current_load
            );
            return Ok(None);
        }
        let image = loaded?;
        self.render(&image).map(Some)
    }

    /// Renders `image` right away, replacing the current result.
    ///
    /// Used where loads run one after another and cannot be superseded.
    pub fn render(&mut self, image: &Image) -> Result<&Preview> {
        let transformer = DuotoneTransformer::new(&self.options);
        let output = transformer.transform(image, &mut self.target)?;
        let preview: &Preview = self.result.insert(Preview::encode(&output)?);
        Ok(preview)
    }

    pub fn result(&self) -> Option<&Preview> {
        self.result.as_ref()
    }
}
