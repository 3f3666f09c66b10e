//! Download the count station layer from the ArcGIS feature service.
//!
//! The service caps the number of features per response, so the layer is
//! paged with `resultOffset`/`resultRecordCount` until a short or empty page
//! comes back. All pages are merged into one FeatureCollection.

use log::info;
use serde_json::{json, Value};

/// NCDOT AADT stations layer.
pub const DEFAULT_LAYER_URL: &str =
    "https://services.arcgis.com/NuWFvHYDMVmmxMeM/ArcGIS/rest/services/NCDOT_AADT_Web_Map_WFL_2023Nov7/FeatureServer/3";

/// Features requested per page; the service's own cap may be lower.
pub const DEFAULT_PAGE_SIZE: usize = 2000;

/// Query URL for one page of the layer as GeoJSON.
pub fn page_url(layer_url: &str, offset: usize, page_size: usize) -> String {
    format!(
        "{}/query?where=1%3D1&outFields=*&outSR=4326&f=geojson&resultOffset={}&resultRecordCount={}",
        layer_url.trim_end_matches('/'),
        offset,
        page_size
    )
}

/// Features of one page, and whether the service says more remain.
pub fn page_features(page: &Value) -> anyhow::Result<(Vec<Value>, bool)> {
    if let Some(error) = page.get("error") {
        anyhow::bail!("Feature service returned an error: {}", error);
    }
    let features = page
        .get("features")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Response has no `features` array"))?;
    let exceeded = page
        .get("exceededTransferLimit")
        .or_else(|| page.pointer("/properties/exceededTransferLimit"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Ok((features, exceeded))
}

/// Wrap features in a FeatureCollection.
pub fn feature_collection(features: Vec<Value>) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Page through the layer and write all features to `output`.
pub async fn run_fetch(output: &str, layer_url: &str, page_size: usize) -> anyhow::Result<()> {
    if page_size == 0 {
        anyhow::bail!("--page-size must be at least 1");
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;

    let mut all_features: Vec<Value> = Vec::new();
    let mut offset = 0;

    loop {
        let url = page_url(layer_url, offset, page_size);
        info!("Fetching stations {}..{}", offset, offset + page_size);

        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("Bad response from feature service: {}", response.status());
        }
        let page: Value = response.json().await?;
        let (features, exceeded) = page_features(&page)?;
        let count = features.len();
        all_features.extend(features);

        info!("  {} features (total {})", count, all_features.len());

        if count == 0 || (!exceeded && count < page_size) {
            break;
        }
        offset += count;

        // Be polite to the feature service
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    }

    let collection = feature_collection(all_features);
    std::fs::write(output, serde_json::to_string(&collection)?)?;

    info!(
        "Fetch complete. {} stations written to {}",
        collection["features"].as_array().map_or(0, Vec::len),
        output
    );
    Ok(())
}
