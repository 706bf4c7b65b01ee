mod web_handlers;
