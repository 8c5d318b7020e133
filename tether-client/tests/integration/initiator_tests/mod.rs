mod test_transport_error_fails_session;
