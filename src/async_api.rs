use crate::surface::RasterSurface;
use crate::{pixelate_with, Error, PointCloudConfig, RenderRequest, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

type SurfaceFactory = dyn Fn() -> Result<Box<dyn RasterSurface + Send>> + Send + Sync;

/// An async-friendly front for `pixelate`.
///
/// Each request builds its own surface from the factory and runs the
/// synchronous pipeline on tokio's blocking pool, so requests never share a
/// buffer. `pixelate_all` bounds how many run at once.
#[derive(Clone)]
pub struct Pixelator {
    factory: Arc<SurfaceFactory>,
    limit: Arc<Semaphore>,
}

impl Pixelator {
    /// Pixelator over the built-in block font, running up to one request per
    /// CPU at a time.
    pub fn new() -> Self {
        Self::with_factory(|| crate::new_surface(None))
    }

    /// Pixelator building surfaces with `factory`.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn RasterSurface + Send>> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            limit: Arc::new(Semaphore::new(num_cpus::get().max(1))),
        }
    }

    /// Cap the number of requests `pixelate_all` runs concurrently.
    pub fn with_concurrency(mut self, permits: usize) -> Self {
        self.limit = Arc::new(Semaphore::new(permits.max(1)));
        self
    }

    /// Convert one request on the blocking pool.
    pub async fn pixelate(&self, request: RenderRequest) -> Result<PointCloudConfig> {
        let factory = Arc::clone(&self.factory);
        tokio::task::spawn_blocking(move || {
            let mut surface = factory()?;
            pixelate_with(&mut surface, &request)
        })
        .await
        .map_err(|e| Error::Other(format!("Pixelate worker failed: {}", e)))?
    }

    /// Convert many requests concurrently; results come back in input order.
    pub async fn pixelate_all(&self, requests: Vec<RenderRequest>) -> Vec<Result<PointCloudConfig>> {
        let jobs = requests.into_iter().map(|request| async move {
            let _permit = self
                .limit
                .acquire()
                .await
                .map_err(|e| Error::Other(format!("Pixelator closed: {}", e)))?;
            self.pixelate(request).await
        });
        join_all(jobs).await
    }
}

impl Default for Pixelator {
    fn default() -> Self {
        Self::new()
    }
}
