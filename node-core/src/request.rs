//! Request builder type for arbitrary api types
use thiserror::Error;

use crate::params::{DeleteParams, GetParams, ListParams, Patch, PatchParams, WatchParams};

pub(crate) const JSON_MIME: &str = "application/json";

/// Possible errors when building a request.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to build a request.
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] http::Error),
    /// Failed to serialize body.
    #[error("failed to serialize body: {0}")]
    SerializeBody(#[source] serde_json::Error),
    /// Failed to validate request.
    #[error("failed to validate request: {0}")]
    Validation(String),
}

/// A request builder for a collection of resources
///
/// Takes a base `url_path` and supplies constructors for the conventional operations.
/// Every constructor returns an `http::Request` ready to be handed to a client.
#[derive(Debug, Clone)]
pub struct Request {
    /// The path component of a url
    pub url_path: String,
}

impl Request {
    /// New request with a resource's url path
    pub fn new<S: Into<String>>(url_path: S) -> Self {
        Self {
            url_path: url_path.into(),
        }
    }

    fn item_path(&self, name: &str) -> Result<String, Error> {
        validate_path_segment("resource name", name)?;
        Ok(format!("{}/{}", self.url_path, name))
    }

    fn subresource_path(&self, subresource_name: &str, name: &str) -> Result<String, Error> {
        validate_path_segment("subresource name", subresource_name)?;
        Ok(format!("{}/{}", self.item_path(name)?, subresource_name))
    }
}

/// Reject names that would escape or alter the resource path
///
/// Mirrors the apiserver's path segment rules: non-empty, not `.` or `..`,
/// and free of `/` and `%`.
pub fn validate_path_segment(what: &str, segment: &str) -> Result<(), Error> {
    if segment.is_empty() {
        return Err(Error::Validation(format!("{what} may not be empty")));
    }
    if segment == "." || segment == ".." {
        return Err(Error::Validation(format!("{what} may not be '{segment}'")));
    }
    for illegal in ["/", "%"] {
        if segment.contains(illegal) {
            return Err(Error::Validation(format!(
                "{what} may not contain '{illegal}': {segment:?}"
            )));
        }
    }
    Ok(())
}

fn with_query(path: String, qp: form_urlencoded::Serializer<String>) -> String {
    let mut qp = qp;
    let query = qp.finish();
    if query.is_empty() {
        path
    } else {
        format!("{path}?{query}")
    }
}

fn query() -> form_urlencoded::Serializer<'static, String> {
    form_urlencoded::Serializer::new(String::new())
}

// -------------------------------------------------------

/// Convenience methods found from API conventions
impl Request {
    /// List a collection of a resource
    pub fn list(&self, lp: &ListParams) -> Result<http::Request<Vec<u8>>, Error> {
        lp.validate()?;
        let mut qp = query();
        lp.populate_qp(&mut qp);
        let urlstr = with_query(self.url_path.clone(), qp);
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// Watch a resource at a given version
    pub fn watch(&self, wp: &WatchParams, ver: &str) -> Result<http::Request<Vec<u8>>, Error> {
        wp.validate()?;
        let mut qp = query();
        wp.populate_qp(&mut qp);
        qp.append_pair("resourceVersion", ver);
        let urlstr = with_query(self.url_path.clone(), qp);
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// Get a single instance
    pub fn get(&self, name: &str, gp: &GetParams) -> Result<http::Request<Vec<u8>>, Error> {
        let mut qp = query();
        gp.populate_qp(&mut qp);
        let urlstr = with_query(self.item_path(name)?, qp);
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// Create an instance of a resource
    pub fn create(&self, data: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        let req = http::Request::post(self.url_path.as_str()).header(http::header::CONTENT_TYPE, JSON_MIME);
        req.body(data).map_err(Error::BuildRequest)
    }

    /// Delete an instance of a resource
    pub fn delete(&self, name: &str, dp: &DeleteParams) -> Result<http::Request<Vec<u8>>, Error> {
        let urlstr = self.item_path(name)?;
        let body = serde_json::to_vec(&dp).map_err(Error::SerializeBody)?;
        let req = http::Request::delete(urlstr).header(http::header::CONTENT_TYPE, JSON_MIME);
        req.body(body).map_err(Error::BuildRequest)
    }

    /// Delete a collection of a resource
    pub fn delete_collection(
        &self,
        dp: &DeleteParams,
        lp: &ListParams,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        lp.validate()?;
        let mut qp = query();
        lp.populate_qp(&mut qp);
        let urlstr = with_query(self.url_path.clone(), qp);
        let body = serde_json::to_vec(&dp).map_err(Error::SerializeBody)?;
        let req = http::Request::delete(urlstr).header(http::header::CONTENT_TYPE, JSON_MIME);
        req.body(body).map_err(Error::BuildRequest)
    }

    /// Patch an instance of a resource
    ///
    /// The `Content-Type` follows the variant of the [`Patch`].
    pub fn patch<P: serde::Serialize>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        self.patch_path(self.item_path(name)?, pp, patch)
    }

    /// Replace an instance of a resource
    ///
    /// Requires `metadata.resourceVersion` set in data
    pub fn replace(&self, name: &str, data: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        let urlstr = self.item_path(name)?;
        let req = http::Request::put(urlstr).header(http::header::CONTENT_TYPE, JSON_MIME);
        req.body(data).map_err(Error::BuildRequest)
    }

    fn patch_path<P: serde::Serialize>(
        &self,
        path: String,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        pp.validate(patch)?;
        let mut qp = query();
        pp.populate_qp(&mut qp);
        let urlstr = with_query(path, qp);

        http::Request::patch(urlstr)
            .header(http::header::ACCEPT, JSON_MIME)
            .header(http::header::CONTENT_TYPE, patch.content_type())
            .body(patch.serialize().map_err(Error::SerializeBody)?)
            .map_err(Error::BuildRequest)
    }
}

/// Subresources
impl Request {
    /// Get an instance of the subresource
    pub fn get_subresource(
        &self,
        subresource_name: &str,
        name: &str,
        gp: &GetParams,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        let mut qp = query();
        gp.populate_qp(&mut qp);
        let urlstr = with_query(self.subresource_path(subresource_name, name)?, qp);
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// Patch an instance of the subresource
    pub fn patch_subresource<P: serde::Serialize>(
        &self,
        subresource_name: &str,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        self.patch_path(self.subresource_path(subresource_name, name)?, pp, patch)
    }

    /// Replace an instance of the subresource
    pub fn replace_subresource(
        &self,
        subresource_name: &str,
        name: &str,
        data: Vec<u8>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        let urlstr = self.subresource_path(subresource_name, name)?;
        let req = http::Request::put(urlstr).header(http::header::CONTENT_TYPE, JSON_MIME);
        req.body(data).map_err(Error::BuildRequest)
    }
}

#[cfg(test)]
mod test {
    use super::{Error, Request};
    use crate::params::{DeleteParams, GetParams, ListParams, Patch, PatchParams, WatchParams};

    const URL: &str = "/apis/node.sapcloud.io/v1alpha1/instancedeployments";

    fn request() -> Request {
        Request::new(URL)
    }

    #[test]
    fn list_path() {
        let req = request().list(&ListParams::default()).unwrap();
        assert_eq!(req.uri().to_string(), URL);
        assert_eq!(req.method(), "GET");
    }

    #[test]
    fn list_with_selectors() {
        let lp = ListParams::default().labels("pool=workers").limit(10);
        let req = request().list(&lp).unwrap();
        assert_eq!(
            req.uri().to_string(),
            format!("{URL}?labelSelector=pool%3Dworkers&limit=10")
        );
    }

    #[test]
    fn watch_path() {
        let req = request().watch(&WatchParams::default(), "0").unwrap();
        assert_eq!(
            req.uri().to_string(),
            format!("{URL}?watch=true&timeoutSeconds=290&allowWatchBookmarks=true&resourceVersion=0")
        );
    }

    #[test]
    fn watch_timeout_validation() {
        let err = request().watch(&WatchParams::default().timeout(300), "0").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn get_path() {
        let req = request().get("web", &GetParams::default()).unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}/web"));
        let req = request().get("web", &GetParams::at("15")).unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}/web?resourceVersion=15"));
    }

    #[test]
    fn create_path() {
        let req = request().create(b"{}".to_vec()).unwrap();
        assert_eq!(req.uri().to_string(), URL);
        assert_eq!(req.method(), "POST");
        assert_eq!(req.headers()["content-type"], "application/json");
        assert_eq!(req.body(), b"{}");
    }

    #[test]
    fn replace_path() {
        let req = request().replace("web", vec![]).unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}/web"));
        assert_eq!(req.method(), "PUT");
    }

    #[test]
    fn delete_path() {
        let req = request().delete("web", &DeleteParams::default()).unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}/web"));
        assert_eq!(req.method(), "DELETE");
        assert_eq!(req.body(), b"{}");
    }

    #[test]
    fn delete_collection_path() {
        let lp = ListParams::default().labels("app=myapp");
        let req = request()
            .delete_collection(&DeleteParams::background(), &lp)
            .unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}?labelSelector=app%3Dmyapp"));
        assert_eq!(req.method(), "DELETE");
        assert_eq!(req.body(), br#"{"propagationPolicy":"Background"}"#);
    }

    #[test]
    fn patch_path() {
        let req = request()
            .patch("web", &PatchParams::default(), &Patch::Merge(()))
            .unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}/web"));
        assert_eq!(req.method(), "PATCH");
        assert_eq!(
            req.headers()["content-type"],
            Patch::Merge(()).content_type()
        );
    }

    #[test]
    fn apply_path() {
        let req = request()
            .patch("web", &PatchParams::apply("ncm").force(), &Patch::Apply(()))
            .unwrap();
        assert_eq!(
            req.uri().to_string(),
            format!("{URL}/web?force=true&fieldManager=ncm")
        );
        assert_eq!(req.headers()["content-type"], "application/apply-patch+yaml");
    }

    #[cfg(feature = "jsonpatch")]
    #[test]
    fn json_patch_path() {
        let ops: json_patch::Patch = serde_json::from_value(serde_json::json!([
            { "op": "replace", "path": "/spec/replicas", "value": 3 }
        ]))
        .unwrap();
        let req = request()
            .patch("web", &PatchParams::default(), &Patch::<()>::Json(ops))
            .unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}/web"));
        assert_eq!(req.method(), "PATCH");
        assert_eq!(req.headers()["content-type"], "application/json-patch+json");
        let body: serde_json::Value = serde_json::from_slice(req.body()).unwrap();
        assert_eq!(
            body,
            serde_json::json!([{ "op": "replace", "path": "/spec/replicas", "value": 3 }])
        );
    }

    #[test]
    fn patch_status_path() {
        let req = request()
            .patch_subresource("status", "web", &PatchParams::default(), &Patch::Strategic(()))
            .unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}/web/status"));
        assert_eq!(
            req.headers()["content-type"],
            "application/strategic-merge-patch+json"
        );
    }

    #[test]
    fn replace_status_path() {
        let req = request().replace_subresource("status", "web", vec![]).unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}/web/status"));
        assert_eq!(req.method(), "PUT");
    }

    #[test]
    fn get_scale_path() {
        let req = request()
            .get_subresource("scale", "web", &GetParams::any())
            .unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}/web/scale?resourceVersion=0"));
        assert_eq!(req.method(), "GET");
    }

    #[test]
    fn replace_scale_path() {
        let req = request().replace_subresource("scale", "web", vec![]).unwrap();
        assert_eq!(req.uri().to_string(), format!("{URL}/web/scale"));
        assert_eq!(req.method(), "PUT");
    }

    #[test]
    fn invalid_names_are_rejected() {
        for name in ["", ".", "..", "a/b", "a%2Fb"] {
            let err = request().get(name, &GetParams::default()).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{name:?} accepted");
        }
        let err = request().replace_subresource("../x", "web", vec![]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(request().delete("web-1.pool", &DeleteParams::default()).is_ok());
    }
}
