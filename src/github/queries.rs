//! GraphQL documents sent by the locator.

macro_rules! status_check_rollup_fragment {
    () => {
        r#"
fragment statusCheckRollup on StatusCheckRollup {
  id
  contexts(first: 100, after: $rollupCursor) {
    pageInfo {
      endCursor
      hasNextPage
    }
    nodes {
      __typename
      ... on CheckRun {
        checkSuite {
          app {
            name
          }
        }
        name
        status
        conclusion
        detailsUrl
      }
      ... on StatusContext {
        context
        state
        targetUrl
      }
    }
  }
}
"#
    };
}

macro_rules! pull_request_fragment {
    () => {
        r#"
fragment pullRequest on PullRequest {
  id
  isDraft
  number
  title
  url
  baseRepository {
    name
    owner {
      login
    }
  }
  reviews(first: 20) {
    nodes {
      author {
        login
      }
      state
      onBehalfOf(first: 5) {
        nodes {
          slug
        }
      }
    }
  }
  reviewRequests(first: 20) {
    nodes {
      requestedReviewer {
        ... on Team {
          slug
        }
      }
    }
  }
  commits(last: 1) {
    nodes {
      commit {
        statusCheckRollup {
          ...statusCheckRollup
        }
      }
    }
  }
}
"#
    };
}

/// Variables: `search`, `rollupCursor` (always null).
pub const PULL_REQUEST_SEARCH: &str = concat!(
    r#"
query($search: String!, $rollupCursor: String) {
  search(query: $search, first: 30, type: ISSUE) {
    nodes {
      ... on PullRequest {
        ...pullRequest
      }
    }
  }
}
"#,
    pull_request_fragment!(),
    status_check_rollup_fragment!()
);

/// Variables: `owner`, `name`, `number`.
pub const PULL_REQUEST_BY_NUMBER: &str = concat!(
    r#"
query($owner: String!, $name: String!, $number: Int!, $rollupCursor: String) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      ...pullRequest
    }
  }
}
"#,
    pull_request_fragment!(),
    status_check_rollup_fragment!()
);

/// Variables: `rollupId`, `rollupCursor`.
pub const ROLLUP_PAGINATION: &str = concat!(
    r#"
query($rollupId: ID!, $rollupCursor: String) {
  node(id: $rollupId) {
    ...statusCheckRollup
  }
}
"#,
    status_check_rollup_fragment!()
);
