//! Subcommands and their execution against the API.

use std::io::Write;

use anyhow::Context;
use clap::{Args, Subcommand};
use s3link_client::{LinkRequest, ListObjectsParams, S3LinkApi, S3ListPage};
use serde::Serialize;

use crate::TRACING_TARGET_COMMAND;

/// Page size used when `--page-size` is not given.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// What the CLI should do.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the storage policies objects can be linked from
    Policies,
    /// Print one page of objects stored under a policy
    Objects(ObjectsArgs),
    /// Link objects as console attachments
    Link {
        /// Storage policy the objects belong to
        policy: String,
        /// Object keys to link
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print the console registration descriptor
    Plugin,
}

/// Arguments of the `objects` subcommand.
#[derive(Debug, Clone, Args)]
pub struct ObjectsArgs {
    /// Storage policy to list
    pub policy: String,

    /// Number of objects per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Token of the page to fetch, as returned in `nextToken`
    #[arg(long)]
    pub continuation_token: Option<String>,

    /// Key of the last object already seen
    #[arg(long, conflicts_with = "basic")]
    pub continuation_object: Option<String>,

    /// Only list objects not yet linked as attachments
    #[arg(long, conflicts_with = "basic")]
    pub unlinked: bool,

    /// Use the listing that only understands the continuation token
    #[arg(long)]
    pub basic: bool,
}

impl ObjectsArgs {
    async fn fetch(&self, api: &S3LinkApi) -> s3link_client::Result<S3ListPage> {
        if self.basic {
            return api
                .list_objects_basic(
                    &self.policy,
                    self.page_size,
                    self.continuation_token.as_deref(),
                )
                .await;
        }

        let mut params = ListObjectsParams::new(&self.policy, self.page_size);
        if let Some(token) = &self.continuation_token {
            params = params.with_continuation_token(token);
        }
        if let Some(key) = &self.continuation_object {
            params = params.with_continuation_object(key);
        }
        if self.unlinked {
            params = params.with_unlinked(true);
        }

        api.list_objects(&params).await
    }
}

/// How a successfully executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Some objects could not be linked.
    PartialFailure,
}

impl Outcome {
    /// Process exit code for this outcome.
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::PartialFailure => 1,
        }
    }
}

impl Command {
    /// Runs the command and writes its JSON output to `out`.
    pub async fn execute<W>(&self, api: &S3LinkApi, out: &mut W) -> anyhow::Result<Outcome>
    where
        W: Write,
    {
        match self {
            Self::Policies => {
                let policies = api
                    .list_policies()
                    .await
                    .context("failed to list storage policies")?;
                write_json(out, &policies)?;
            }
            Self::Objects(args) => {
                let page = args
                    .fetch(api)
                    .await
                    .with_context(|| format!("failed to list objects of '{}'", args.policy))?;
                tracing::debug!(
                    target: TRACING_TARGET_COMMAND,
                    objects = page.objects.len(),
                    has_more = page.has_more,
                    "Fetched object page"
                );
                write_json(out, &page)?;
            }
            Self::Link { policy, keys } => {
                let request = LinkRequest::new(policy, keys);
                let report = api
                    .link_attachments(&request)
                    .await
                    .with_context(|| format!("failed to link objects of '{policy}'"))?;
                write_json(out, &report)?;

                if !report.is_complete() {
                    tracing::warn!(
                        target: TRACING_TARGET_COMMAND,
                        failed = report.failed().count(),
                        requested = keys.len(),
                        "Some objects were not linked"
                    );
                    return Ok(Outcome::PartialFailure);
                }
            }
            Self::Plugin => {
                let descriptor = s3link_plugin::plugin();
                descriptor
                    .validate()
                    .context("invalid plugin descriptor")?;
                write_json(out, descriptor)?;
            }
        }

        Ok(Outcome::Success)
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to encode output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use s3link_client::mock::{MockTransport, RecordedRequest};
    use s3link_client::{Error, ErrorKind};
    use serde_json::{Value, json};

    use super::*;
    use crate::config::Cli;

    fn parse(args: &[&str]) -> Command {
        let args = std::iter::once("s3link").chain(args.iter().copied());
        Cli::try_parse_from(args).unwrap().command
    }

    async fn run(command: &Command, transport: &MockTransport) -> (Outcome, Value) {
        let api = S3LinkApi::new(transport.clone());
        let mut out = Vec::new();
        let outcome = command.execute(&api, &mut out).await.unwrap();
        (outcome, serde_json::from_slice(&out).unwrap())
    }

    #[test]
    fn test_basic_rejects_extra_filters() {
        let result =
            Cli::try_parse_from(["s3link", "objects", "s3-minio", "--basic", "--unlinked"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from([
            "s3link",
            "objects",
            "s3-minio",
            "--basic",
            "--continuation-object",
            "a.png",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_link_requires_keys() {
        assert!(Cli::try_parse_from(["s3link", "link", "s3-minio"]).is_err());
    }

    #[tokio::test]
    async fn test_objects_sends_only_given_filters() {
        let transport = MockTransport::json(json!({ "objects": [], "hasMore": false }));
        let command = parse(&["objects", "s3-minio", "--page-size", "10", "--unlinked"]);

        let (outcome, output) = run(&command, &transport).await;
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(output["hasMore"], json!(false));

        let RecordedRequest::Get { path, query } = &transport.requests()[0] else {
            panic!("expected a GET request");
        };
        assert!(path.ends_with("/objects/s3-minio"));
        assert_eq!(query.get("pageSize"), Some("10"));
        assert_eq!(query.get("unlinked"), Some("true"));
        assert!(!query.contains("continuationToken"));
        assert!(!query.contains("continuationObject"));
    }

    #[tokio::test]
    async fn test_objects_basic_listing() {
        let transport = MockTransport::json(json!({ "objects": [], "hasMore": false }));
        let command = parse(&["objects", "s3-minio", "--basic", "--continuation-token", "t-2"]);

        run(&command, &transport).await;

        let RecordedRequest::Get { query, .. } = &transport.requests()[0] else {
            panic!("expected a GET request");
        };
        let names: Vec<_> = query.names().collect();
        assert_eq!(names, ["continuationToken", "pageSize"]);
        assert_eq!(query.get("pageSize"), Some("50"));
    }

    #[tokio::test]
    async fn test_link_partial_failure() {
        let transport = MockTransport::json(json!({
            "items": [
                { "objectKey": "a.png", "success": true },
                { "objectKey": "b.png", "success": false, "message": "exists" }
            ]
        }));
        let command = parse(&["link", "s3-minio", "a.png", "b.png"]);

        let (outcome, output) = run(&command, &transport).await;
        assert_eq!(outcome, Outcome::PartialFailure);
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(output["items"][1]["message"], json!("exists"));

        let RecordedRequest::Post { body, .. } = &transport.requests()[0] else {
            panic!("expected a POST request");
        };
        assert_eq!(
            body,
            &json!({ "policyName": "s3-minio", "objectKeys": ["a.png", "b.png"] })
        );
    }

    #[tokio::test]
    async fn test_plugin_prints_descriptor() {
        let transport = MockTransport::json(Value::Null);
        let (outcome, output) = run(&Command::Plugin, &transport).await;

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(output["routes"][0]["route"]["path"], json!("/s3link"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_errors_carry_context() {
        let transport = MockTransport::failing(|| Error::from_status(503, "down"));
        let api = S3LinkApi::new(transport);

        let error = Command::Policies
            .execute(&api, &mut Vec::new())
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "failed to list storage policies");
        assert_eq!(
            error.downcast_ref::<Error>().map(|e| e.kind),
            Some(ErrorKind::ServiceUnavailable)
        );
    }
}
