/// An incoming admission request as handed over by the transport layer.
///
/// Contains the correlation identifier the caller will match the decision
/// against, the declared kind of the candidate resource, and its raw JSON
/// encoding. The core never mutates a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionRequest {
    /// Opaque correlation identifier, echoed back verbatim in the decision
    pub uid: String,
    /// Declared kind of the candidate resource (e.g. `"Pipeline"`)
    pub kind: String,
    /// Raw encoding of the candidate resource
    pub object: Vec<u8>,
    /// Operation being admitted (`CREATE`, `UPDATE`, ...), if known
    pub operation: Option<String>,
    /// Namespace the resource is headed for, if known
    pub namespace: Option<String>,
    /// Name of the resource as reported by the control plane, if known
    pub name: Option<String>,
}

impl AdmissionRequest {
    /// Creates a request with the three required fields.
    pub fn new(uid: impl Into<String>, kind: impl Into<String>, object: impl Into<Vec<u8>>) -> Self {
        Self {
            uid: uid.into(),
            kind: kind.into(),
            object: object.into(),
            operation: None,
            namespace: None,
            name: None,
        }
    }

    /// Sets the operation being admitted.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the target namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the resource name reported by the control plane.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
