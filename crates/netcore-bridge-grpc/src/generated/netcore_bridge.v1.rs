// @generated
// Generated from: proto/netcore_bridge/v1/{event_interceptor,state_interceptor,entity_platform}.proto
// Manual check-in for offline builds.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventMessage {
    #[prost(string, tag = "1")]
    pub event_type: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub entity_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub json_data: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub context_id: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct EventDecision {
    #[prost(bool, tag = "1")]
    pub handled: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StateWriteRequest {
    #[prost(string, tag = "1")]
    pub entity_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub state: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub attributes_json: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub context_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StateDecision {
    #[prost(bool, tag = "1")]
    pub handled: bool,
    #[prost(string, tag = "2")]
    pub override_state: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub override_attributes_json: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformInfo {
    #[prost(string, tag = "1")]
    pub domain: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub platform_name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub config_entry_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntityInfo {
    #[prost(string, tag = "1")]
    pub entity_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub domain: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub platform: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub unique_id: ::prost::alloc::string::String,
    #[prost(bool, tag = "6")]
    pub should_poll: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformSetupRequest {
    #[prost(message, optional, tag = "1")]
    pub platform: ::core::option::Option<PlatformInfo>,
    #[prost(string, tag = "2")]
    pub context_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformResetRequest {
    #[prost(message, optional, tag = "1")]
    pub platform: ::core::option::Option<PlatformInfo>,
    #[prost(string, tag = "2")]
    pub context_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntitiesAddedRequest {
    #[prost(message, optional, tag = "1")]
    pub platform: ::core::option::Option<PlatformInfo>,
    #[prost(message, repeated, tag = "2")]
    pub entities: ::prost::alloc::vec::Vec<EntityInfo>,
    #[prost(string, tag = "3")]
    pub context_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntityAddedRequest {
    #[prost(message, optional, tag = "1")]
    pub platform: ::core::option::Option<PlatformInfo>,
    #[prost(message, optional, tag = "2")]
    pub entity: ::core::option::Option<EntityInfo>,
    #[prost(string, tag = "3")]
    pub context_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntityRemovedRequest {
    #[prost(message, optional, tag = "1")]
    pub platform: ::core::option::Option<PlatformInfo>,
    #[prost(string, tag = "2")]
    pub entity_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub context_id: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct LifecycleDecision {
    #[prost(bool, tag = "1")]
    pub ok: bool,
}

pub mod event_interceptor_client {
    #![allow(clippy::derive_partial_eq_without_eq)]
    use tonic::codegen::*;

    #[derive(Debug, Clone)]
    pub struct EventInterceptorClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl EventInterceptorClient<tonic::transport::Channel> {
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> EventInterceptorClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
        <T::ResponseBody as Body>::Data: Into<Bytes> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        pub async fn intercept_event(
            &mut self,
            request: impl tonic::IntoRequest<super::EventMessage>,
        ) -> Result<tonic::Response<super::EventDecision>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = tonic::codegen::http::uri::PathAndQuery::from_static(
                "/netcore_bridge.v1.EventInterceptor/InterceptEvent",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}

pub mod state_interceptor_client {
    #![allow(clippy::derive_partial_eq_without_eq)]
    use tonic::codegen::*;

    #[derive(Debug, Clone)]
    pub struct StateInterceptorClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl StateInterceptorClient<tonic::transport::Channel> {
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> StateInterceptorClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
        <T::ResponseBody as Body>::Data: Into<Bytes> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        pub async fn intercept_state_write(
            &mut self,
            request: impl tonic::IntoRequest<super::StateWriteRequest>,
        ) -> Result<tonic::Response<super::StateDecision>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = tonic::codegen::http::uri::PathAndQuery::from_static(
                "/netcore_bridge.v1.StateInterceptor/InterceptStateWrite",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}

pub mod entity_platform_interceptor_client {
    #![allow(clippy::derive_partial_eq_without_eq)]
    use tonic::codegen::*;

    #[derive(Debug, Clone)]
    pub struct EntityPlatformInterceptorClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl EntityPlatformInterceptorClient<tonic::transport::Channel> {
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> EntityPlatformInterceptorClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
        <T::ResponseBody as Body>::Data: Into<Bytes> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        pub async fn platform_setup(
            &mut self,
            request: impl tonic::IntoRequest<super::PlatformSetupRequest>,
        ) -> Result<tonic::Response<super::LifecycleDecision>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = tonic::codegen::http::uri::PathAndQuery::from_static(
                "/netcore_bridge.v1.EntityPlatformInterceptor/PlatformSetup",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn platform_reset(
            &mut self,
            request: impl tonic::IntoRequest<super::PlatformResetRequest>,
        ) -> Result<tonic::Response<super::LifecycleDecision>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = tonic::codegen::http::uri::PathAndQuery::from_static(
                "/netcore_bridge.v1.EntityPlatformInterceptor/PlatformReset",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn entities_added(
            &mut self,
            request: impl tonic::IntoRequest<super::EntitiesAddedRequest>,
        ) -> Result<tonic::Response<super::LifecycleDecision>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = tonic::codegen::http::uri::PathAndQuery::from_static(
                "/netcore_bridge.v1.EntityPlatformInterceptor/EntitiesAdded",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn entity_added(
            &mut self,
            request: impl tonic::IntoRequest<super::EntityAddedRequest>,
        ) -> Result<tonic::Response<super::LifecycleDecision>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = tonic::codegen::http::uri::PathAndQuery::from_static(
                "/netcore_bridge.v1.EntityPlatformInterceptor/EntityAdded",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn entity_removed(
            &mut self,
            request: impl tonic::IntoRequest<super::EntityRemovedRequest>,
        ) -> Result<tonic::Response<super::LifecycleDecision>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = tonic::codegen::http::uri::PathAndQuery::from_static(
                "/netcore_bridge.v1.EntityPlatformInterceptor/EntityRemoved",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}

pub mod event_interceptor_server {
    #![allow(clippy::derive_partial_eq_without_eq)]
    use tonic::codegen::*;

    #[tonic::async_trait]
    pub trait EventInterceptor: Send + Sync + 'static {
        async fn intercept_event(
            &self,
            request: tonic::Request<super::EventMessage>,
        ) -> Result<tonic::Response<super::EventDecision>, tonic::Status>;
    }

    #[derive(Debug, Clone)]
    pub struct EventInterceptorServer<T: EventInterceptor> {
        inner: Arc<T>,
    }

    impl<T: EventInterceptor> EventInterceptorServer<T> {
        pub fn new(inner: T) -> Self {
            Self {
                inner: Arc::new(inner),
            }
        }

        pub fn from_arc(inner: Arc<T>) -> Self {
            Self { inner }
        }
    }

    impl<T: EventInterceptor> Service<http::Request<tonic::body::BoxBody>> for EventInterceptorServer<T> {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: http::Request<tonic::body::BoxBody>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/netcore_bridge.v1.EventInterceptor/InterceptEvent" => {
                    struct InterceptEventSvc<T: EventInterceptor>(pub Arc<T>);
                    impl<T: EventInterceptor> tonic::server::UnaryService<super::EventMessage> for InterceptEventSvc<T> {
                        type Response = super::EventDecision;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::EventMessage>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            Box::pin(async move { inner.intercept_event(request).await })
                        }
                    }
                    Box::pin(async move {
                        let method = InterceptEventSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    })
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::empty_body())
                        .unwrap())
                }),
            }
        }
    }

    impl<T: EventInterceptor> tonic::server::NamedService for EventInterceptorServer<T> {
        const NAME: &'static str = "netcore_bridge.v1.EventInterceptor";
    }
}

pub mod state_interceptor_server {
    #![allow(clippy::derive_partial_eq_without_eq)]
    use tonic::codegen::*;

    #[tonic::async_trait]
    pub trait StateInterceptor: Send + Sync + 'static {
        async fn intercept_state_write(
            &self,
            request: tonic::Request<super::StateWriteRequest>,
        ) -> Result<tonic::Response<super::StateDecision>, tonic::Status>;
    }

    #[derive(Debug, Clone)]
    pub struct StateInterceptorServer<T: StateInterceptor> {
        inner: Arc<T>,
    }

    impl<T: StateInterceptor> StateInterceptorServer<T> {
        pub fn new(inner: T) -> Self {
            Self {
                inner: Arc::new(inner),
            }
        }

        pub fn from_arc(inner: Arc<T>) -> Self {
            Self { inner }
        }
    }

    impl<T: StateInterceptor> Service<http::Request<tonic::body::BoxBody>> for StateInterceptorServer<T> {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: http::Request<tonic::body::BoxBody>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/netcore_bridge.v1.StateInterceptor/InterceptStateWrite" => {
                    struct InterceptStateWriteSvc<T: StateInterceptor>(pub Arc<T>);
                    impl<T: StateInterceptor> tonic::server::UnaryService<super::StateWriteRequest> for InterceptStateWriteSvc<T> {
                        type Response = super::StateDecision;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::StateWriteRequest>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            Box::pin(async move { inner.intercept_state_write(request).await })
                        }
                    }
                    Box::pin(async move {
                        let method = InterceptStateWriteSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    })
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::empty_body())
                        .unwrap())
                }),
            }
        }
    }

    impl<T: StateInterceptor> tonic::server::NamedService for StateInterceptorServer<T> {
        const NAME: &'static str = "netcore_bridge.v1.StateInterceptor";
    }
}

pub mod entity_platform_interceptor_server {
    #![allow(clippy::derive_partial_eq_without_eq)]
    use tonic::codegen::*;

    #[tonic::async_trait]
    pub trait EntityPlatformInterceptor: Send + Sync + 'static {
        async fn platform_setup(
            &self,
            request: tonic::Request<super::PlatformSetupRequest>,
        ) -> Result<tonic::Response<super::LifecycleDecision>, tonic::Status>;
        async fn platform_reset(
            &self,
            request: tonic::Request<super::PlatformResetRequest>,
        ) -> Result<tonic::Response<super::LifecycleDecision>, tonic::Status>;
        async fn entities_added(
            &self,
            request: tonic::Request<super::EntitiesAddedRequest>,
        ) -> Result<tonic::Response<super::LifecycleDecision>, tonic::Status>;
        async fn entity_added(
            &self,
            request: tonic::Request<super::EntityAddedRequest>,
        ) -> Result<tonic::Response<super::LifecycleDecision>, tonic::Status>;
        async fn entity_removed(
            &self,
            request: tonic::Request<super::EntityRemovedRequest>,
        ) -> Result<tonic::Response<super::LifecycleDecision>, tonic::Status>;
    }

    #[derive(Debug, Clone)]
    pub struct EntityPlatformInterceptorServer<T: EntityPlatformInterceptor> {
        inner: Arc<T>,
    }

    impl<T: EntityPlatformInterceptor> EntityPlatformInterceptorServer<T> {
        pub fn new(inner: T) -> Self {
            Self {
                inner: Arc::new(inner),
            }
        }

        pub fn from_arc(inner: Arc<T>) -> Self {
            Self { inner }
        }
    }

    impl<T: EntityPlatformInterceptor> Service<http::Request<tonic::body::BoxBody>> for EntityPlatformInterceptorServer<T> {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: http::Request<tonic::body::BoxBody>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/netcore_bridge.v1.EntityPlatformInterceptor/PlatformSetup" => {
                    struct PlatformSetupSvc<T: EntityPlatformInterceptor>(pub Arc<T>);
                    impl<T: EntityPlatformInterceptor> tonic::server::UnaryService<super::PlatformSetupRequest> for PlatformSetupSvc<T> {
                        type Response = super::LifecycleDecision;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::PlatformSetupRequest>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            Box::pin(async move { inner.platform_setup(request).await })
                        }
                    }
                    Box::pin(async move {
                        let method = PlatformSetupSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    })
                }
                "/netcore_bridge.v1.EntityPlatformInterceptor/PlatformReset" => {
                    struct PlatformResetSvc<T: EntityPlatformInterceptor>(pub Arc<T>);
                    impl<T: EntityPlatformInterceptor> tonic::server::UnaryService<super::PlatformResetRequest> for PlatformResetSvc<T> {
                        type Response = super::LifecycleDecision;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::PlatformResetRequest>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            Box::pin(async move { inner.platform_reset(request).await })
                        }
                    }
                    Box::pin(async move {
                        let method = PlatformResetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    })
                }
                "/netcore_bridge.v1.EntityPlatformInterceptor/EntitiesAdded" => {
                    struct EntitiesAddedSvc<T: EntityPlatformInterceptor>(pub Arc<T>);
                    impl<T: EntityPlatformInterceptor> tonic::server::UnaryService<super::EntitiesAddedRequest> for EntitiesAddedSvc<T> {
                        type Response = super::LifecycleDecision;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::EntitiesAddedRequest>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            Box::pin(async move { inner.entities_added(request).await })
                        }
                    }
                    Box::pin(async move {
                        let method = EntitiesAddedSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    })
                }
                "/netcore_bridge.v1.EntityPlatformInterceptor/EntityAdded" => {
                    struct EntityAddedSvc<T: EntityPlatformInterceptor>(pub Arc<T>);
                    impl<T: EntityPlatformInterceptor> tonic::server::UnaryService<super::EntityAddedRequest> for EntityAddedSvc<T> {
                        type Response = super::LifecycleDecision;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::EntityAddedRequest>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            Box::pin(async move { inner.entity_added(request).await })
                        }
                    }
                    Box::pin(async move {
                        let method = EntityAddedSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    })
                }
                "/netcore_bridge.v1.EntityPlatformInterceptor/EntityRemoved" => {
                    struct EntityRemovedSvc<T: EntityPlatformInterceptor>(pub Arc<T>);
                    impl<T: EntityPlatformInterceptor> tonic::server::UnaryService<super::EntityRemovedRequest> for EntityRemovedSvc<T> {
                        type Response = super::LifecycleDecision;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::EntityRemovedRequest>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            Box::pin(async move { inner.entity_removed(request).await })
                        }
                    }
                    Box::pin(async move {
                        let method = EntityRemovedSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    })
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::empty_body())
                        .unwrap())
                }),
            }
        }
    }

    impl<T: EntityPlatformInterceptor> tonic::server::NamedService for EntityPlatformInterceptorServer<T> {
        const NAME: &'static str = "netcore_bridge.v1.EntityPlatformInterceptor";
    }
}
