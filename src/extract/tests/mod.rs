mod fake_document_tests;
