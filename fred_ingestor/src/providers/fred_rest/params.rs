use crate::models::request_params::ObservationsRequest;

/// Builds the query string for a `/fred/series/observations` call.
///
/// FRED expects ISO dates in `observation_start`/`observation_end`; both are
/// inclusive and omitted when the request window is unbounded on that side.
pub fn observation_params(request: &ObservationsRequest, api_key: &str) -> Vec<(String, String)> {
    let mut params = vec![
        ("series_id".to_string(), request.series_id.clone()),
        ("api_key".to_string(), api_key.to_string()),
        ("file_type".to_string(), "json".to_string()),
    ];

    if let Some(start) = request.start {
        params.push((
            "observation_start".to_string(),
            start.format("%Y-%m-%d").to_string(),
        ));
    }
    if let Some(end) = request.end {
        params.push((
            "observation_end".to_string(),
            end.format("%Y-%m-%d").to_string(),
        ));
    }

    params
}

/// Builds the query string for a `/fred/series` call.
pub fn series_params(series_id: &str, api_key: &str) -> Vec<(String, String)> {
    vec![
        ("series_id".to_string(), series_id.to_string()),
        ("api_key".to_string(), api_key.to_string()),
        ("file_type".to_string(), "json".to_string()),
    ]
}
