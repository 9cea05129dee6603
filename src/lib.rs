pub mod modules {
    pub mod members {
        pub mod core {
            pub mod clock;
            pub mod member;
            pub mod ports;
            pub mod validation;
            pub mod versioning;
        }
        pub mod store {
            pub mod errors;
            pub mod versioned_store;
        }
        pub mod service;
        pub mod use_cases {
            pub mod insert_member {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod update_member_keep_history {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod get_active_member {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_member_history {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
                pub mod http_error;
            }
            pub mod outbound {
                pub mod in_memory_member_collection;
            }
        }
    }
}

pub mod shell;

#[cfg(test)]
pub mod tests {
    pub mod fixtures;
}
