mod test_two_clients_over_socket;
